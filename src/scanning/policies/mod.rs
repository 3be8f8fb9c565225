mod related_link_policy;

pub use related_link_policy::{Expansion, RelatedLinkPolicy};
