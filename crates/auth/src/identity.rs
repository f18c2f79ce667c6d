//! Account-holder identity and its public projection.

use serde::Serialize;

use tellerdesk_core::{Money, UserId};

/// The only identity shape that ever leaves the trust boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub username: String,
}

/// Contact and classification fields of the account holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Customer segment, e.g. `"Retail"`.
    #[serde(rename = "type")]
    pub customer_type: String,
}

/// Partial profile edit. `None` leaves the field as it is.
///
/// There is no way to express a change of id, username, password or limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub customer_type: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Identity echo for profile endpoints: the projection plus profile fields
/// and the spending limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(flatten)]
    pub profile: Profile,
    pub limit: Money,
}

/// Full internal record of the account holder.
///
/// Deliberately not `Serialize`; use [`project`] or [`UserRecord::details`]
/// to produce anything a caller may see.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub name: String,
    pub profile: Profile,
    /// Informational spending ceiling; not enforced against withdrawals.
    pub limit: Money,
}

impl UserRecord {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        limit: Money,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            name: name.into(),
            profile: Profile::default(),
            limit,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn identity(&self) -> Identity {
        project(self)
    }

    pub fn details(&self) -> UserDetails {
        UserDetails {
            identity: project(self),
            profile: self.profile.clone(),
            limit: self.limit,
        }
    }
}

impl core::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("profile", &self.profile)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Strip everything but `id`, `name` and `username`.
pub fn project(record: &UserRecord) -> Identity {
    Identity {
        id: record.id.clone(),
        name: record.name.clone(),
        username: record.username.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(password: &str) -> UserRecord {
        UserRecord::new(
            UserId::new("1101").unwrap(),
            "user",
            password,
            "Bhanupriya",
            Money::from_minor_units(500_000),
        )
    }

    #[test]
    fn projection_keeps_exactly_three_fields() {
        let json = serde_json::to_value(project(&record("user"))).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "name", "username"]);
        assert_eq!(obj["id"], "1101");
    }

    #[test]
    fn details_add_limit_but_not_password() {
        let json = serde_json::to_value(record("user").details()).unwrap();
        assert_eq!(json["limit"], "5000.00");
        assert_eq!(json["username"], "user");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn details_flatten_profile_fields() {
        let rec = record("user").with_profile(Profile {
            email: "priya@example.com".to_string(),
            phone: "+91 0000000000".to_string(),
            address: "Test data".to_string(),
            customer_type: "Retail".to_string(),
        });
        let json = serde_json::to_value(rec.details()).unwrap();
        assert_eq!(json["email"], "priya@example.com");
        assert_eq!(json["type"], "Retail");
        assert_eq!(json["id"], "1101");

        // The projection stays at three fields regardless of profile data.
        assert!(serde_json::to_value(project(&rec)).unwrap().get("email").is_none());
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", record("hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    proptest! {
        /// Property: no projection ever carries the password, whatever it is.
        #[test]
        fn projection_never_leaks_password(
            name in "[A-Za-z ]{1,24}",
            username in "[a-z]{1,12}",
            password in "[a-zA-Z0-9]{12,32}",
        ) {
            let rec = UserRecord::new(
                UserId::new("42").unwrap(),
                username.clone(),
                password.clone(),
                name.clone(),
                Money::zero(),
            );
            let identity = serde_json::to_value(project(&rec)).unwrap();
            let details = serde_json::to_value(rec.details()).unwrap();

            prop_assert!(identity.get("password").is_none());
            prop_assert!(details.get("password").is_none());
            prop_assert_eq!(identity["name"].as_str(), Some(name.as_str()));
            prop_assert_eq!(identity["username"].as_str(), Some(username.as_str()));
        }
    }
}
