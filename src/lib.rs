//! Client library for S3-compatible object storage.
//!
//! The main entry point is [`client::Client`], which issues signed requests
//! against an S3-compatible endpoint and maps bucket ACL documents into the
//! canonical [`acl::Acl`] values.

pub mod acl;
pub mod client;
pub mod config;
pub mod error;
pub mod signing;
pub mod transport;
pub mod utils;
pub mod xml;

pub use acl::{AccessControlPolicy, Acl, Grant, Grantee, Group, Owner, Permission};
pub use client::{Client, DEFAULT_USER_AGENT};
pub use config::Config;
pub use error::{Error, Result};
