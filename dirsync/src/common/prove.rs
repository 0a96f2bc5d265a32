//! Inclusion proofs for single entries of a directory listing.

use std::path::Path;

use anyhow::{anyhow, ensure, Result};
use log::debug;
use merkletree::{Hash32, ProofPath};

use super::blocks::{find_index, scan_tree};
use super::utils::hex_root;

/// Proof that one path, with its current contents, belongs to the listing
/// committed to by `root`.
#[derive(Debug, Clone)]
pub struct PathProof {
    pub path: String,
    pub root: Hash32,
    pub proof: ProofPath,
}

impl PathProof {
    pub fn verify(&self) -> Result<bool> {
        Ok(self.proof.check(&self.root)?)
    }

    /// Human readable rendering, one field per line.
    pub fn render(&self) -> String {
        let mut out = format!(
            "path: {}\nroot: {}\nindex: {}\nleaf: {}\n",
            self.path,
            hex_root(Some(&self.root)),
            self.proof.leaf_index,
            hex::encode(self.proof.leaf_hash),
        );
        for (level, sibling) in self.proof.siblings.iter().enumerate() {
            out.push_str(&format!("sibling[{}]: {}\n", level, hex::encode(sibling)));
        }
        out
    }
}

/// Scans `dir` and generates the inclusion proof of `rel_path`.
///
/// `rel_path` is relative to `dir` and `/`-separated; a leading `./` and
/// surrounding slashes are ignored.
pub fn prove_path(dir: &Path, rel_path: &str, hash_threads: usize) -> Result<PathProof> {
    let path = normalize(rel_path);
    let (files, tree) = scan_tree(dir, hash_threads)?;
    let tree = tree.ok_or_else(|| anyhow!("{} is empty", dir.display()))?;
    let index = find_index(&files, path.as_bytes())
        .ok_or_else(|| anyhow!("{} not found in {}", path, dir.display()))?;

    let proof = tree.generate_proof(index)?;
    let path_proof = PathProof {
        path: path.to_string(),
        root: tree.root(),
        proof,
    };
    ensure!(path_proof.verify()?, "generated proof for {} does not verify", path);
    debug!("proved {} at index {} of {}", path, index, files.len());
    Ok(path_proof)
}

fn normalize(rel_path: &str) -> &str {
    rel_path.trim_start_matches("./").trim_matches('/')
}
