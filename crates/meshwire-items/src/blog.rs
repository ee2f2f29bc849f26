//! Blog service items.
//!
//! Only the profile record is exchanged today: a timestamp plus an open
//! key/value set describing the author. It runs through the same field
//! processor as everything else.

use std::any::Any;

use meshwire_core::wire::tlv::tag;
use meshwire_core::{Item, Result, SerialCtx, WireFields};

/// Blog service id.
pub const SERVICE_BLOG: u16 = 0x0013;

/// Subtype namespace owned by the blog service.
pub mod subtype {
    pub const PROFILE: u8 = 0x01;
}

/// One entry of a profile's key/value set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KvPair {
    pub key: String,
    pub value: String,
}

impl WireFields for KvPair {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.str_field(tag::STR_KEY, &mut self.key, "key")?;
        ctx.str_field(tag::STR_VALUE, &mut self.value, "value")
    }
}

/// Public author profile: last-updated timestamp plus an open-ended
/// key/value set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlogProfile {
    pub timestamp: u32,
    pub profile: Vec<KvPair>,
}

impl WireFields for BlogProfile {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u32_field(&mut self.timestamp, "timestamp")?;
        ctx.seq_field(&mut self.profile, "profile")
    }
}

impl Item for BlogProfile {
    fn service(&self) -> u16 {
        SERVICE_BLOG
    }
    fn subtype(&self) -> u8 {
        subtype::PROFILE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory for the blog service's subtypes.
pub struct BlogItemFactory;

impl meshwire_core::ItemFactory for BlogItemFactory {
    fn service(&self) -> u16 {
        SERVICE_BLOG
    }

    fn create(&self, subtype: u8) -> Option<Box<dyn Item>> {
        match subtype {
            subtype::PROFILE => Some(Box::new(BlogProfile::default())),
            _ => None,
        }
    }
}
