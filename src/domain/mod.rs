//! Core domain types shared by the cache, installer and prompt layers

pub mod package;

pub use package::{PackageDescriptor, PackageKind};
