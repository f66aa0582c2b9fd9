use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";
pub const AUTHENTICATED_USERS_URI: &str =
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

/// Bucket owner as reported in an AccessControlPolicy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub display_name: String,
}

/// Well-known grantee groups recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    AllUsers,
    AuthenticatedUsers,
}

impl Group {
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            ALL_USERS_URI => Some(Group::AllUsers),
            AUTHENTICATED_USERS_URI => Some(Group::AuthenticatedUsers),
            _ => None,
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            Group::AllUsers => ALL_USERS_URI,
            Group::AuthenticatedUsers => AUTHENTICATED_USERS_URI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grantee {
    CanonicalUser { id: String, display_name: String },
    Group(Group),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    FullControl,
    Write,
    WriteAcp,
    Read,
    ReadAcp,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::FullControl => "FULL_CONTROL",
            Permission::Write => "WRITE",
            Permission::WriteAcp => "WRITE_ACP",
            Permission::Read => "READ",
            Permission::ReadAcp => "READ_ACP",
        }
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL_CONTROL" => Ok(Permission::FullControl),
            "WRITE" => Ok(Permission::Write),
            "WRITE_ACP" => Ok(Permission::WriteAcp),
            "READ" => Ok(Permission::Read),
            "READ_ACP" => Ok(Permission::ReadAcp),
            other => Err(Error::InvalidPermission(other.to_string())),
        }
    }
}

/// A single (grantee, permission) authorization pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub grantee: Grantee,
    pub permission: Permission,
}

/// Parsed AccessControlPolicy document: one owner plus zero-or-more grants,
/// in the order the server returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlPolicy {
    pub owner: Owner,
    pub grants: Vec<Grant>,
}

impl AccessControlPolicy {
    pub fn acl(&self) -> Acl {
        classify(&self.grants)
    }
}

/// Canonical ACL values exposed to callers instead of raw grant lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acl {
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
}

impl Acl {
    /// Canned-ACL name as used in x-amz-acl headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Acl::Private => "private",
            Acl::PublicRead => "public-read",
            Acl::PublicReadWrite => "public-read-write",
            Acl::AuthenticatedRead => "authenticated-read",
        }
    }
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a grant list to its canonical ACL value.
///
/// Rules are checked in a fixed order and the first match wins; reordering
/// them changes the result for overlapping grant sets. Grant sets that match
/// no rule (including owner-only FULL_CONTROL) classify as `Private` rather
/// than failing.
pub fn classify(grants: &[Grant]) -> Acl {
    let has_group = |group: Group, permission: Permission| {
        grants
            .iter()
            .any(|g| g.permission == permission && g.grantee == Grantee::Group(group))
    };

    if has_group(Group::AllUsers, Permission::Write) && has_group(Group::AllUsers, Permission::Read)
    {
        Acl::PublicReadWrite
    } else if has_group(Group::AllUsers, Permission::Read) {
        Acl::PublicRead
    } else if has_group(Group::AuthenticatedUsers, Permission::Read) {
        Acl::AuthenticatedRead
    } else {
        Acl::Private
    }
}
