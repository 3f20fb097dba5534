//! Serde helpers for name-keyed collections that must keep their order.
//!
//! The remote contract serializes expense collections as JSON objects keyed
//! by expense name, and the object's key order carries the user's chosen
//! display order. Plain map types would lose that order, so the collections
//! are stored as vectors of pairs and (de)serialized through this module.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

pub fn serialize<S, T>(entries: &[(String, T)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (name, value) in entries {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct PairVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for PairVisitor<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<(String, T)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map keyed by expense name")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, value)) = access.next_entry::<String, T>()? {
                // Duplicate keys keep the first position but the last value.
                match entries.iter().position(|(existing, _)| *existing == name) {
                    Some(index) => entries[index] = (name, value),
                    None => entries.push((name, value)),
                }
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(PairVisitor(PhantomData))
}
