//! An extension to the collections in the standard library with a binary-search-tree set
//! supporting both a plain and a self-balancing (AVL) mode.

pub mod bst;
