use std::{sync::Arc, thread};

use merkletree::{
    check,
    hasher::{hash, hash2},
    verify_proof, Hash32, MerkleError, ProofPath, Tree,
};

fn build_test_tree(n: usize) -> Tree {
    let blocks: Vec<Vec<u8>> = (0..n).map(|i| format!("block-{}", i).into_bytes()).collect();
    Tree::new(&blocks).unwrap()
}

fn flip(digest: &Hash32, byte: usize) -> Hash32 {
    let mut out = *digest;
    out[byte] ^= 0x01;
    out
}

#[test]
fn test_every_index_verifies() {
    for n in 1..=33 {
        let tree = build_test_tree(n);
        check::check_hash_consistency(&tree).unwrap();
        for i in 0..n {
            let proof = tree.generate_proof(i).unwrap();
            assert_eq!(proof.siblings.len(), tree.height());
            assert_eq!(proof.leaf_hash, tree.leaves()[i]);
            assert_eq!(
                verify_proof(&tree.root(), &proof.siblings, &proof.leaf_hash, i),
                Ok(true),
                "n={} i={}",
                n,
                i
            );
        }
    }
}

#[test]
fn test_wrong_index_is_rejected() {
    for n in 2..=20 {
        let tree = build_test_tree(n);
        for i in 0..n {
            let proof = tree.generate_proof(i).unwrap();
            for j in (0..n).filter(|&j| j != i) {
                assert_eq!(
                    verify_proof(&tree.root(), &proof.siblings, &proof.leaf_hash, j),
                    Ok(false),
                    "n={} proved={} claimed={}",
                    n,
                    i,
                    j
                );
            }
        }
    }
}

#[test]
fn test_single_byte_tampering_is_rejected() {
    for n in [2, 3, 5, 8, 13] {
        let tree = build_test_tree(n);
        let root = tree.root();
        for i in 0..n {
            let ProofPath {
                leaf_index,
                leaf_hash,
                siblings,
            } = tree.generate_proof(i).unwrap();
            for byte in 0..32 {
                assert_eq!(
                    verify_proof(&flip(&root, byte), &siblings, &leaf_hash, leaf_index),
                    Ok(false)
                );
                assert_eq!(
                    verify_proof(&root, &siblings, &flip(&leaf_hash, byte), leaf_index),
                    Ok(false)
                );
                for s in 0..siblings.len() {
                    let mut tampered = siblings.clone();
                    tampered[s] = flip(&siblings[s], byte);
                    assert_eq!(
                        verify_proof(&root, &tampered, &leaf_hash, leaf_index),
                        Ok(false),
                        "n={} i={} sibling={} byte={}",
                        n,
                        i,
                        s,
                        byte
                    );
                }
            }
        }
    }
}

#[test]
fn test_single_leaf_tree() {
    let tree = Tree::new([b"A"]).unwrap();
    assert_eq!(tree.root(), hash(b"A"));
    let proof = tree.generate_proof(0).unwrap();
    assert!(proof.siblings.is_empty());
    assert_eq!(
        verify_proof::<Hash32>(&tree.root(), &[], &hash(b"A"), 0),
        Ok(true)
    );
    assert_eq!(
        verify_proof::<Hash32>(&tree.root(), &[], &flip(&hash(b"A"), 0), 0),
        Ok(false)
    );
}

#[test]
fn test_two_leaf_scenario() {
    let tree = Tree::new([b"A", b"B"]).unwrap();
    assert_eq!(tree.root(), hash2(hash(b"A"), hash(b"B")));
    let proof = tree.generate_proof(1).unwrap();
    assert_eq!(proof.siblings, vec![hash(b"A")]);
    assert_eq!(
        verify_proof(&tree.root(), &proof.siblings, &proof.leaf_hash, 0),
        Ok(false)
    );
}

#[test]
fn test_three_leaf_scenario() {
    let tree = Tree::new([b"A", b"B", b"C"]).unwrap();
    let (ha, hb, hc) = (hash(b"A"), hash(b"B"), hash(b"C"));
    assert_eq!(tree.level(0).unwrap().len(), 3);
    assert_eq!(tree.level(1).unwrap(), &[hash2(ha, hb), hash2(hc, hc)]);
    assert_eq!(tree.root(), hash2(hash2(ha, hb), hash2(hc, hc)));
    assert_eq!(
        tree.generate_proof(2).unwrap().siblings,
        vec![hc, hash2(ha, hb)]
    );
}

#[test]
fn test_five_leaf_scenario() {
    let tree = Tree::new([b"A", b"B", b"C", b"D", b"E"]).unwrap();
    let proof = tree.generate_proof(4).unwrap();
    assert_eq!(proof.siblings[0], hash(b"E"));
    assert_eq!(proof.siblings[0], proof.leaf_hash);
    assert!(proof.check(&tree.root()).unwrap());
}

#[test]
fn test_errors() {
    let empty: [&[u8]; 0] = [];
    assert!(matches!(Tree::new(empty), Err(MerkleError::EmptyInput)));

    let tree = build_test_tree(4);
    assert_eq!(
        tree.generate_proof(-1),
        Err(MerkleError::OutOfBoundary { leaf_count: 4 })
    );
    assert_eq!(
        tree.generate_proof(tree.leaf_count()),
        Err(MerkleError::OutOfBoundary { leaf_count: 4 })
    );

    let proof = tree.generate_proof(1).unwrap();
    assert_eq!(
        verify_proof::<Hash32>(&[], &[], &proof.leaf_hash, 0),
        Err(MerkleError::InvalidProofInputs)
    );
    assert_eq!(
        verify_proof::<Hash32>(&tree.root(), &[], &[], 0),
        Err(MerkleError::InvalidProofInputs)
    );

    let mut path: Vec<Vec<u8>> = proof.siblings.iter().map(|s| s.to_vec()).collect();
    path[1] = vec![];
    let result = verify_proof(&tree.root(), &path, &proof.leaf_hash, 1);
    assert_eq!(result, Err(MerkleError::InvalidProof { position: 1 }));
    assert_eq!(
        result.unwrap_err().to_string(),
        "merkletree: invalid proof: empty sibling hash at position 1"
    );
}

#[test]
fn test_wrong_width_sibling_is_rejected() {
    let tree = build_test_tree(6);
    let proof = tree.generate_proof(3).unwrap();
    for position in 0..proof.siblings.len() {
        let mut path: Vec<Vec<u8>> = proof.siblings.iter().map(|s| s.to_vec()).collect();
        path[position].pop();
        assert_eq!(path[position].len(), 31);
        assert_eq!(
            verify_proof(&tree.root(), &path, &proof.leaf_hash, 3),
            Ok(false),
            "position={}",
            position
        );
        path[position].extend_from_slice(&[0u8; 2]);
        assert_eq!(
            verify_proof(&tree.root(), &path, &proof.leaf_hash, 3),
            Ok(false)
        );
    }
}

#[test]
fn test_determinism() {
    for n in [1, 2, 7, 64, 100] {
        assert_eq!(build_test_tree(n).root(), build_test_tree(n).root());
    }
    assert_ne!(build_test_tree(6).root(), build_test_tree(7).root());
}

#[test]
fn test_proof_outlives_tree() {
    let proof;
    let root;
    {
        let tree = build_test_tree(9);
        proof = tree.generate_proof(8).unwrap();
        root = tree.root();
    }
    assert_eq!(proof.check(&root), Ok(true));
    assert_eq!(proof.compute_root(), root);
}

#[test]
fn test_concurrent_proof_generation() {
    let n = 1000;
    let tree = Arc::new(build_test_tree(n));
    let root = tree.root();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for i in (t..n).step_by(8) {
                    let proof = tree.generate_proof(i).unwrap();
                    assert!(proof.check(&root).unwrap());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_large_tree_shape() {
    let tree = build_test_tree(1025);
    assert_eq!(tree.height(), 11);
    assert_eq!(tree.level(tree.height()).unwrap().len(), 1);
    let proof = tree.generate_proof(1024).unwrap();
    // the last leaf is unpaired on every level but the topmost
    for k in 0..10 {
        let own = tree.level(k).unwrap()[1024 >> k];
        assert_eq!(proof.siblings[k], own, "level {}", k);
    }
    assert_eq!(proof.siblings[10], tree.level(10).unwrap()[0]);
    assert_eq!(proof.siblings[0], proof.leaf_hash);
    assert!(proof.check(&tree.root()).unwrap());
}
