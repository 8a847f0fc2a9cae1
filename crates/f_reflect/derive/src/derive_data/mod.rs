//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod record_struct;

// -----------------------------------------------------------------------------
// Internal API

use attributes::{FieldAttributes, PropertyAttribute, TypeAttributes};
pub(crate) use record_struct::{Member, MemberSource, RecordStruct};
