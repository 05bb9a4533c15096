use crate::avl_tree::AvlMap;
use crate::red_black_tree::RedBlackMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

// Maps serialize as a serde map with entries in ascending key order. Deserializing
// inserts every pair in turn, so later duplicates overwrite earlier ones and incomparable keys
// surface as a deserialization error.
macro_rules! impl_serde {
    ($map:ident, $visitor:ident, $expecting:expr) => {
        impl<K, V> Serialize for $map<K, V>
        where
            K: Serialize,
            V: Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_map(self.iter())
            }
        }

        impl<'de, K, V> Deserialize<'de> for $map<K, V>
        where
            K: PartialOrd + Deserialize<'de>,
            V: Deserialize<'de>,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_map($visitor {
                    marker: PhantomData,
                })
            }
        }

        struct $visitor<K, V> {
            marker: PhantomData<(K, V)>,
        }

        impl<'de, K, V> Visitor<'de> for $visitor<K, V>
        where
            K: PartialOrd + Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = $map<K, V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str($expecting)
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = $map::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value).map_err(de::Error::custom)?;
                }
                Ok(map)
            }
        }
    };
}

impl_serde!(AvlMap, AvlMapVisitor, "an avl map");
impl_serde!(RedBlackMap, RedBlackMapVisitor, "a red black map");
