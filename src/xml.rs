//! XML documents exchanged with S3-compatible endpoints.
//!
//! Parsing goes through raw serde structs mirroring the document shape, then
//! converts into the typed model in [`crate::acl`]. Grantee typing is driven
//! by the `<URI>` element: servers commonly label group grants with
//! `xsi:type="CanonicalUser"`, so a recognized group URI always wins.

use serde::Deserialize;

use crate::acl::{AccessControlPolicy, Grant, Grantee, Group, Owner, Permission};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct PolicyDocument {
    #[serde(rename = "Owner")]
    owner: OwnerElement,
    #[serde(rename = "AccessControlList")]
    access_control_list: AccessControlListElement,
}

#[derive(Debug, Deserialize)]
struct OwnerElement {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "DisplayName", default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessControlListElement {
    #[serde(rename = "Grant", default)]
    grants: Vec<GrantElement>,
}

#[derive(Debug, Deserialize)]
struct GrantElement {
    #[serde(rename = "Grantee")]
    grantee: GranteeElement,
    #[serde(rename = "Permission")]
    permission: String,
}

#[derive(Debug, Deserialize)]
struct GranteeElement {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "DisplayName", default)]
    display_name: Option<String>,
    #[serde(rename = "URI", default)]
    uri: Option<String>,
}

impl GranteeElement {
    fn into_grantee(self) -> Grantee {
        if let Some(group) = self.uri.as_deref().and_then(Group::from_uri) {
            return Grantee::Group(group);
        }
        Grantee::CanonicalUser {
            id: self.id.unwrap_or_default(),
            display_name: self.display_name.unwrap_or_default(),
        }
    }
}

/// Parse an AccessControlPolicy response body into the typed model.
///
/// Grant order is preserved exactly as it appears in the document.
pub fn parse_access_control_policy(body: &[u8]) -> Result<AccessControlPolicy> {
    let document: PolicyDocument = serde_xml_rs::from_reader(body)?;

    let mut grants = Vec::with_capacity(document.access_control_list.grants.len());
    for grant in document.access_control_list.grants {
        grants.push(Grant {
            grantee: grant.grantee.into_grantee(),
            permission: grant.permission.parse::<Permission>()?,
        });
    }

    Ok(AccessControlPolicy {
        owner: Owner {
            id: document.owner.id.unwrap_or_default(),
            display_name: document.owner.display_name.unwrap_or_default(),
        },
        grants,
    })
}

/// Serialize a policy back to XML, grants in their original order.
pub fn access_control_policy_xml(policy: &AccessControlPolicy) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push_str("\n<AccessControlPolicy xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">");
    xml.push_str("\n  <Owner>");
    xml.push_str(&format!("\n    <ID>{}</ID>", policy.owner.id));
    xml.push_str(&format!(
        "\n    <DisplayName>{}</DisplayName>",
        policy.owner.display_name
    ));
    xml.push_str("\n  </Owner>");
    xml.push_str("\n  <AccessControlList>");

    for grant in &policy.grants {
        xml.push_str("\n    <Grant>");
        match &grant.grantee {
            Grantee::CanonicalUser { id, display_name } => {
                xml.push_str("\n      <Grantee xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:type=\"CanonicalUser\">");
                xml.push_str(&format!("\n        <ID>{id}</ID>"));
                xml.push_str(&format!("\n        <DisplayName>{display_name}</DisplayName>"));
                xml.push_str("\n      </Grantee>");
            }
            Grantee::Group(group) => {
                xml.push_str("\n      <Grantee xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:type=\"Group\">");
                xml.push_str(&format!("\n        <URI>{}</URI>", group.uri()));
                xml.push_str("\n      </Grantee>");
            }
        }
        xml.push_str(&format!(
            "\n      <Permission>{}</Permission>",
            grant.permission.as_str()
        ));
        xml.push_str("\n    </Grant>");
    }

    xml.push_str("\n  </AccessControlList>");
    xml.push_str("\n</AccessControlPolicy>");
    xml
}

#[derive(Debug, Deserialize)]
struct ErrorDocument {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

/// Parse an S3 `<Error>` response body into a typed API error.
pub fn parse_error_response(body: &[u8]) -> Result<Error> {
    let document: ErrorDocument = serde_xml_rs::from_reader(body)?;
    Ok(Error::Api {
        code: document.code,
        message: document.message.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acl::Acl;

    const PUBLIC_READ_WRITE: &str = r#"
        <AccessControlPolicy xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
          <Owner>
            <ID>75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a</ID>
            <DisplayName>CustomersName@amazon.com</DisplayName>
          </Owner>
          <AccessControlList>
            <Grant>
              <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
                <ID>75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a</ID>
                <DisplayName>CustomersName@amazon.com</DisplayName>
                <URI>http://acs.amazonaws.com/groups/global/AllUsers</URI>
              </Grantee>
              <Permission>WRITE</Permission>
            </Grant>
            <Grant>
              <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
                <ID>75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a</ID>
                <DisplayName>CustomersName@amazon.com</DisplayName>
                <URI>http://acs.amazonaws.com/groups/global/AllUsers</URI>
              </Grantee>
              <Permission>READ</Permission>
            </Grant>
            <Grant>
              <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
                <ID>75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a</ID>
                <DisplayName>CustomersName@amazon.com</DisplayName>
              </Grantee>
              <Permission>FULL_CONTROL</Permission>
            </Grant>
          </AccessControlList>
        </AccessControlPolicy>
    "#;

    #[test]
    fn parses_policy_with_group_uri_winning_over_xsi_type() {
        let policy = parse_access_control_policy(PUBLIC_READ_WRITE.as_bytes()).unwrap();

        assert_eq!(
            policy.owner.id,
            "75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a"
        );
        assert_eq!(policy.owner.display_name, "CustomersName@amazon.com");
        assert_eq!(policy.grants.len(), 3);

        // Order preserved: WRITE, READ, then the owner's FULL_CONTROL.
        assert_eq!(
            policy.grants[0].grantee,
            Grantee::Group(Group::AllUsers)
        );
        assert_eq!(policy.grants[0].permission, Permission::Write);
        assert_eq!(
            policy.grants[1].grantee,
            Grantee::Group(Group::AllUsers)
        );
        assert_eq!(policy.grants[1].permission, Permission::Read);
        assert!(matches!(
            policy.grants[2].grantee,
            Grantee::CanonicalUser { .. }
        ));
        assert_eq!(policy.grants[2].permission, Permission::FullControl);

        assert_eq!(policy.acl(), Acl::PublicReadWrite);
    }

    #[test]
    fn parses_empty_access_control_list() {
        let body = r#"
            <AccessControlPolicy xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
              <Owner>
                <ID>abc</ID>
                <DisplayName>abc@example.com</DisplayName>
              </Owner>
              <AccessControlList></AccessControlList>
            </AccessControlPolicy>
        "#;
        let policy = parse_access_control_policy(body.as_bytes()).unwrap();
        assert!(policy.grants.is_empty());
        assert_eq!(policy.acl(), Acl::Private);
    }

    #[test]
    fn unrecognized_group_uri_degrades_to_canonical_user() {
        let body = r#"
            <AccessControlPolicy xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
              <Owner>
                <ID>abc</ID>
                <DisplayName>abc@example.com</DisplayName>
              </Owner>
              <AccessControlList>
                <Grant>
                  <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="Group">
                    <URI>http://acs.amazonaws.com/groups/s3/LogDelivery</URI>
                  </Grantee>
                  <Permission>WRITE</Permission>
                </Grant>
              </AccessControlList>
            </AccessControlPolicy>
        "#;
        let policy = parse_access_control_policy(body.as_bytes()).unwrap();
        assert_eq!(policy.grants.len(), 1);
        assert!(matches!(
            policy.grants[0].grantee,
            Grantee::CanonicalUser { .. }
        ));
        assert_eq!(policy.acl(), Acl::Private);
    }

    #[test]
    fn rejects_unknown_permission() {
        let body = r#"
            <AccessControlPolicy xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
              <Owner>
                <ID>abc</ID>
                <DisplayName>abc@example.com</DisplayName>
              </Owner>
              <AccessControlList>
                <Grant>
                  <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="Group">
                    <URI>http://acs.amazonaws.com/groups/global/AllUsers</URI>
                  </Grantee>
                  <Permission>OWN</Permission>
                </Grant>
              </AccessControlList>
            </AccessControlPolicy>
        "#;
        assert!(parse_access_control_policy(body.as_bytes()).is_err());
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(parse_access_control_policy(b"<AccessControlPolicy>").is_err());
        assert!(parse_access_control_policy(b"not xml at all").is_err());
    }

    #[test]
    fn serialization_preserves_grant_order() {
        let policy = parse_access_control_policy(PUBLIC_READ_WRITE.as_bytes()).unwrap();
        let xml = access_control_policy_xml(&policy);

        let write_pos = xml.find("<Permission>WRITE</Permission>").unwrap();
        let read_pos = xml.find("<Permission>READ</Permission>").unwrap();
        let full_pos = xml.find("<Permission>FULL_CONTROL</Permission>").unwrap();
        assert!(write_pos < read_pos && read_pos < full_pos);

        let reparsed = parse_access_control_policy(xml.as_bytes()).unwrap();
        assert_eq!(reparsed.grants, policy.grants);
    }

    #[test]
    fn parses_error_response() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
            <Error>
              <Code>NoSuchBucket</Code>
              <Message>The specified bucket does not exist</Message>
              <Resource>/hello</Resource>
              <RequestId>4442587FB7D0A2F9</RequestId>
            </Error>
        "#;
        let err = parse_error_response(body.as_bytes()).unwrap();
        match err {
            Error::Api { code, message } => {
                assert_eq!(code, "NoSuchBucket");
                assert_eq!(message, "The specified bucket does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
