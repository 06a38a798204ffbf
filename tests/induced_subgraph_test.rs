mod common;

use anyhow::Result;
use common::{flatten, induced_subgraph_validate, HostCsr};
use induced::{
    extract_induced_subgraphs, CsrPartition, ExtractError, ExtractOptions, InducedSubgraphExtractor,
    InvalidInput, MembershipKind,
};
use petgraph::graph::{DiGraph, NodeIndex};

/// A deterministic weighted graph with multi-edges and self-loops.
fn host_graph(n: usize) -> (Vec<usize>, Vec<u32>, Vec<f64>) {
    let mut offsets = vec![0];
    let mut indices = Vec::new();
    let mut weights = Vec::new();
    for u in 0..n {
        for j in 0..(u % 5 + 1) {
            let v = ((u * 7 + j * 13) % n) as u32;
            indices.push(v);
            weights.push((u * 100 + j) as f64 * 0.5);
        }
        if u % 4 == 0 {
            indices.push(u as u32);
            weights.push(-1.0);
        }
        if u % 6 == 0 {
            // Multi-edge: repeat the first neighbor.
            indices.push(indices[offsets[u]]);
            weights.push(weights[offsets[u]]);
        }
        offsets.push(indices.len());
    }
    (offsets, indices, weights)
}

#[test]
fn test_spec_example() -> Result<()> {
    let graph = CsrPartition::<u32>::from_adjacency(&[vec![1, 2], vec![0, 3], vec![0], vec![1]]);
    let batch = extract_induced_subgraphs(&graph, &[0, 2, 4], &[0, 1, 2, 3], 2, true)?;

    let (majors, minors, weights, offsets) = batch.into_parts();
    assert_eq!(majors, vec![0, 1]);
    assert_eq!(minors, vec![1, 0]);
    assert_eq!(weights, None);
    assert_eq!(offsets, vec![0, 2, 2]);
    Ok(())
}

#[test]
fn test_matches_reference_checker() -> Result<()> {
    let (offsets, indices, weights) = host_graph(200);
    let graph = CsrPartition::<u32, f64>::from_csr_parts(offsets.clone(), indices.clone(), Some(weights.clone()));
    let host = HostCsr {
        offsets: &offsets,
        indices: &indices,
        weights: Some(&weights),
    };

    let groups: Vec<Vec<u32>> = (0..40u32)
        .map(|g| (0..200u32).filter(|v| (v * 31 + g * 17) % 11 < 3).collect())
        .chain(std::iter::once(Vec::new()))
        .collect();
    let (sub_offsets, sub_vertices) = flatten(&groups);

    for membership in [MembershipKind::Sorted, MembershipKind::Hashed] {
        let extractor = InducedSubgraphExtractor::new(
            ExtractOptions::default()
                .with_validation(true)
                .with_membership(membership)
                .with_min_parallel_len(8)
                .with_num_threads(3),
        );
        let batch = extractor.extract(&graph, &sub_offsets, &sub_vertices, groups.len())?;
        induced_subgraph_validate(&host, &sub_offsets, &sub_vertices, &batch);
    }
    Ok(())
}

#[test]
fn test_identity_subgraph_returns_every_local_edge() -> Result<()> {
    let (offsets, indices, weights) = host_graph(64);
    let graph = CsrPartition::<u32, f64>::from_csr_parts(offsets, indices, Some(weights));
    let all: Vec<u32> = (0..64).collect();

    let batch = extract_induced_subgraphs(&graph, &[0, all.len()], &all, 1, true)?;

    let mut expected: Vec<_> = graph.edges().map(|(u, v, w)| (u, v, w.map(f64::to_bits))).collect();
    let mut actual: Vec<_> = batch.subgraph(0).map(|(u, v, w)| (u, v, w.map(f64::to_bits))).collect();
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);

    // Filtering preserves CSR order, so even the unsorted sequences agree.
    assert_eq!(batch.edge_majors(), graph.edges().map(|e| e.0).collect::<Vec<_>>().as_slice());
    Ok(())
}

#[test]
fn test_agrees_with_petgraph_oracle() -> Result<()> {
    let n = 120usize;
    let (offsets, indices, _) = host_graph(n);
    let graph = CsrPartition::<u32>::from_csr_parts(offsets.clone(), indices.clone(), None);

    let mut pg = DiGraph::<(), ()>::with_capacity(n, indices.len());
    let nodes: Vec<NodeIndex> = (0..n).map(|_| pg.add_node(())).collect();
    for u in 0..n {
        for &v in &indices[offsets[u]..offsets[u + 1]] {
            pg.add_edge(nodes[u], nodes[v as usize], ());
        }
    }

    let groups: Vec<Vec<u32>> = (0..10u32)
        .map(|g| (g * 3..g * 3 + 25).map(|v| v % n as u32).collect())
        .collect();
    let (sub_offsets, sub_vertices) = flatten(&groups);
    let batch = extract_induced_subgraphs(&graph, &sub_offsets, &sub_vertices, groups.len(), true)?;

    for k in 0..groups.len() {
        let members = &sub_vertices[sub_offsets[k]..sub_offsets[k + 1]];
        let mut expected: Vec<(u32, u32)> = members
            .iter()
            .flat_map(|&u| {
                pg.neighbors(nodes[u as usize])
                    .map(move |v| (u, v.index() as u32))
            })
            .filter(|(_, v)| members.binary_search(v).is_ok())
            .collect();
        let mut actual: Vec<(u32, u32)> = batch.subgraph(k).map(|(u, v, _)| (u, v)).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected, "subgraph {k}");
    }
    Ok(())
}

#[test]
fn test_validator_rejects_malformed_requests() {
    let graph = CsrPartition::<u32>::from_adjacency(&[vec![1], vec![0], vec![]]);
    let cases: [(&[usize], &[u32], InvalidInput); 4] = [
        (&[1, 2], &[0, 1], InvalidInput::OffsetsStart),
        (&[0, 2, 1, 2], &[0, 1], InvalidInput::OffsetsUnsorted { position: 1 }),
        (&[0, 2], &[0, 7], InvalidInput::VertexNotLocal { position: 1 }),
        (&[0, 3], &[0, 2, 1], InvalidInput::SegmentUnsorted { subgraph: 0 }),
    ];

    for (offsets, vertices, expected) in cases {
        let err = extract_induced_subgraphs(&graph, offsets, vertices, offsets.len() - 1, true)
            .expect_err("malformed request must be rejected");
        assert_eq!(err, ExtractError::InvalidArgument(expected));
    }

    let err = extract_induced_subgraphs(&graph, &[0, 2], &[1, 1], 1, true).unwrap_err();
    assert_eq!(err.invalid_input(), Some(InvalidInput::SegmentDuplicate { subgraph: 0 }));
}

#[test]
fn test_split_graph_is_refused() {
    let shard = CsrPartition::<u32>::shard_from_csr_parts(vec![0, 1, 1], vec![3], None, 2, 4, 2);
    let err = extract_induced_subgraphs(&shard, &[0, 2], &[2, 3], 1, true).unwrap_err();
    assert!(matches!(err, ExtractError::NotImplemented(_)));
    assert!(err.to_string().starts_with("not implemented"));

    // A malformed request on the same shard is reported as such first.
    let err = extract_induced_subgraphs(&shard, &[1, 2], &[2, 3], 1, true).unwrap_err();
    assert_eq!(err, ExtractError::InvalidArgument(InvalidInput::OffsetsStart));
}
