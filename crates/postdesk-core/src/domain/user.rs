/// Profile columns that are written together in one statement.
///
/// `Music` is deliberately absent: it is applied by its own statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Hobby,
    Description,
    ProfilePicture,
}

impl ProfileField {
    /// Fixed application order for the batched `SET` clause.
    pub const ALL: [ProfileField; 3] = [Self::Hobby, Self::Description, Self::ProfilePicture];
}

/// The value written to one profile column. `None` stores NULL.
pub type FieldValue = Option<String>;

/// A sparse update to one user's profile.
///
/// An outer `None` leaves the column untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub hobby: Option<FieldValue>,
    pub description: Option<FieldValue>,
    pub profile_picture: Option<FieldValue>,
    pub music: Option<FieldValue>,
}

impl ProfileUpdate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    fn field(&self, field: ProfileField) -> Option<&FieldValue> {
        match field {
            ProfileField::Hobby => self.hobby.as_ref(),
            ProfileField::Description => self.description.as_ref(),
            ProfileField::ProfilePicture => self.profile_picture.as_ref(),
        }
    }

    /// The (column, value) pairs to write, in [`ProfileField::ALL`] order.
    pub fn field_changes(&self) -> Vec<(ProfileField, FieldValue)> {
        ProfileField::ALL
            .into_iter()
            .filter_map(|field| self.field(field).map(|value| (field, value.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_changes_only_lists_present_fields() {
        let mut update = ProfileUpdate::new("alice");
        update.description = Some(Some("hi".into()));

        assert_eq!(
            update.field_changes(),
            vec![(ProfileField::Description, Some("hi".to_string()))]
        );
    }

    #[test]
    fn field_changes_follow_fixed_order() {
        let update = ProfileUpdate {
            username: "alice".into(),
            hobby: Some(Some("chess".into())),
            description: Some(Some("d".into())),
            profile_picture: Some(Some("p.png".into())),
            music: Some(Some("jazz".into())),
        };

        let fields: Vec<_> = update
            .field_changes()
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, ProfileField::ALL);
    }

    #[test]
    fn explicit_null_is_a_change() {
        let mut update = ProfileUpdate::new("alice");
        update.hobby = Some(None);

        assert_eq!(update.field_changes(), vec![(ProfileField::Hobby, None)]);
    }

    #[test]
    fn music_is_not_a_batched_field() {
        let mut update = ProfileUpdate::new("alice");
        update.music = Some(Some("jazz".into()));
        assert!(update.field_changes().is_empty());
    }
}
