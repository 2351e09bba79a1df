//! Workspace users and bots.

use serde::de;
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::codec::{closed_enum, decode_tagged, encode_tagged, tagged_union, TaggedUnion};
use crate::models::{Empty, ObjectId};

closed_enum! {
    /// Whether a user is a person or an integration.
    pub enum UserType {
        Person = "person",
        Bot = "bot",
    }
}

/// Details only people have.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The person's email, if the integration may read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

tagged_union! {
    /// The person or bot specific part of a user.
    pub enum UserKind(tag = UserType) {
        Person(Person),
        Bot(Empty),
    }
}

/// A user of the workspace.
///
/// Users embedded in other objects (`created_by`, mentions) are often
/// partial and carry only their id, in which case `kind` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    /// The user id.
    pub id: ObjectId,
    /// The display name.
    pub name: Option<String>,
    /// The avatar image URL.
    pub avatar_url: Option<String>,
    /// Person or bot details. Absent on partial user objects.
    pub kind: Option<UserKind>,
}

#[derive(Serialize, Deserialize)]
struct UserFields {
    id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
}

impl User {
    /// A user known only by id.
    #[must_use]
    pub const fn partial(id: ObjectId) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
            kind: None,
        }
    }

    /// Returns the email of a person.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            Some(UserKind::Person(person)) => person.email.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this user is an integration.
    #[must_use]
    pub fn is_bot(&self) -> bool {
        matches!(self.kind, Some(UserKind::Bot(_)))
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = UserFields {
            id: self.id,
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        };
        let Value::Object(mut map) = serde_json::to_value(fields).map_err(ser::Error::custom)?
        else {
            return Err(ser::Error::custom("user fields did not encode as an object"));
        };

        map.insert("object".to_string(), Value::String("user".to_string()));
        if let Some(kind) = &self.kind {
            map.extend(encode_tagged(kind).map_err(ser::Error::custom)?);
        }
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let fields: UserFields =
            serde_json::from_value(Value::Object(map.clone())).map_err(de::Error::custom)?;

        let kind = if map.contains_key(UserKind::DISCRIMINATOR) {
            Some(decode_tagged::<UserKind>(map).map_err(de::Error::custom)?)
        } else {
            None
        };

        Ok(Self {
            id: fields.id,
            name: fields.name,
            avatar_url: fields.avatar_url,
            kind,
        })
    }
}
