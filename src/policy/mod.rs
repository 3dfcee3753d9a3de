pub mod slab_lru;
