//! Serde support through the text form.
//!
//! Ids, event trees and stamps serialize as their text form string, e.g. a
//! seed stamp becomes `"(1,0)"` in JSON.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::event::Event;
use crate::id::Id;
use crate::stamp::Stamp;

struct TextVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for TextVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }
}

macro_rules! text_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_str(TextVisitor {
                    expecting: $expecting,
                    marker: PhantomData,
                })
            }
        }
    };
}

text_serde!(Id, "an interval tree clock id in text form");
text_serde!(Event, "an interval tree clock event tree in text form");
text_serde!(Stamp, "an interval tree clock stamp in text form");
