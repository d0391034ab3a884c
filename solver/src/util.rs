pub type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

pub type IndexSet<V> = indexmap::IndexSet<V, BuildHasher>;
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasher>;
