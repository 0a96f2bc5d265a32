//! One-way directory synchronization driven by Merkle tree roots.
//!
//! Both directories are scanned into a path-sorted listing, every listing is
//! turned into an ordered sequence of blocks and hashed into a
//! [`merkletree::Tree`]. Equal roots mean the directories hold the same
//! paths with the same contents and nothing else runs. Otherwise the
//! listings are compared entry by entry and the destination is brought in
//! line with the source.

pub mod common;
