//! Page decoder module
//!
//! Turns one response body into a [`Page`]: the item list plus the cursor
//! pointing at the next page.
//!
//! # Overview
//!
//! Both fields are located with dotted paths (`results`, `info.next`).
//! A body that lacks the item list or the pagination metadata is a decode
//! error, never an empty page, so a malformed payload cannot be mistaken
//! for the end of the sequence.

mod decoders;
mod types;

pub use decoders::JsonPageDecoder;
pub use types::{DecoderConfig, Page, PageDecoder, DEFAULT_ITEMS_PATH, DEFAULT_NEXT_PATH};
