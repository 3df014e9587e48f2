//! Ring assembly from disconnected segment fragments.
//!
//! Relation members arrive as an unordered pool of open or closed polyline
//! fragments. Assembly greedily splices fragments end-to-end by exact
//! endpoint equality: one chain per connected component, in encounter
//! order. When several fragments could continue a chain, the first match in
//! pool order wins; the policy is arbitrary but deterministic, so results
//! are reproducible.

use geo::Coord;
use log::warn;

/// True when the sequence starts and ends on the same coordinate.
#[must_use]
pub fn is_closed(points: &[Coord<f64>]) -> bool {
    points.len() >= 2 && points.first() == points.last()
}

/// Close `ring` by appending its first point when needed. Idempotent.
#[must_use]
pub fn close_ring(mut ring: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    if let Some(&first) = ring.first() {
        if ring.last() != Some(&first) {
            ring.push(first);
        }
    }
    ring
}

/// Join segments end-to-end without forcing closure.
///
/// Returns the resulting paths, one per connected component of the segment
/// graph, in encounter order. Open paths are expected; route relations are
/// rarely loops.
#[must_use]
pub fn splice_chains(segments: Vec<Vec<Coord<f64>>>) -> Vec<Vec<Coord<f64>>> {
    collect_chains(segments, false)
}

/// Join segments into closed rings.
///
/// Every emitted ring is force-closed and carries at least four points
/// (three distinct plus the closing duplicate); chains that close to fewer
/// are discarded with a warning.
#[must_use]
pub fn assemble_rings(segments: Vec<Vec<Coord<f64>>>) -> Vec<Vec<Coord<f64>>> {
    let mut rings = Vec::new();
    for chain in collect_chains(segments, true) {
        let ring = close_ring(chain);
        if ring.len() >= 4 {
            rings.push(ring);
        } else {
            warn!("discarding malformed ring of {} points", ring.len());
        }
    }
    rings
}

fn collect_chains(segments: Vec<Vec<Coord<f64>>>, stop_on_closure: bool) -> Vec<Vec<Coord<f64>>> {
    let mut pool = segments;
    let mut chains = Vec::new();
    while !pool.is_empty() {
        let mut chain = pool.remove(0);
        if chain.len() < 2 {
            continue;
        }
        splice_from_pool(&mut chain, &mut pool, stop_on_closure);
        chains.push(chain);
    }
    chains
}

/// Extend `chain` with pool segments whose first or last point matches the
/// chain's tail, reversing where needed, until no match remains (or the
/// chain closes, in ring mode). Removal preserves pool order so the
/// first-match policy stays literal.
fn splice_from_pool(
    chain: &mut Vec<Coord<f64>>,
    pool: &mut Vec<Vec<Coord<f64>>>,
    stop_on_closure: bool,
) {
    while !pool.is_empty() && !(stop_on_closure && is_closed(chain)) {
        let Some(&tail) = chain.last() else {
            return;
        };
        let Some(index) = pool
            .iter()
            .position(|segment| segment.first() == Some(&tail) || segment.last() == Some(&tail))
        else {
            return;
        };
        let mut segment = pool.remove(index);
        if segment.first() != Some(&tail) {
            segment.reverse();
        }
        // Drop the duplicated junction point before appending.
        chain.pop();
        chain.append(&mut segment);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn matching_endpoints_splice_into_one_chain() {
        let segments = vec![vec![c(0.0, 0.0), c(1.0, 1.0)], vec![c(1.0, 1.0), c(2.0, 2.0)]];
        let chains = splice_chains(segments);
        assert_eq!(chains, vec![vec![c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)]]);
    }

    #[test]
    fn reversed_segments_splice_to_the_same_chain() {
        let segments = vec![vec![c(0.0, 0.0), c(1.0, 1.0)], vec![c(2.0, 2.0), c(1.0, 1.0)]];
        let chains = splice_chains(segments);
        assert_eq!(chains, vec![vec![c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)]]);
    }

    #[test]
    fn tie_breaks_take_the_first_pool_match() {
        let segments = vec![
            vec![c(0.0, 0.0), c(1.0, 1.0)],
            vec![c(1.0, 1.0), c(2.0, 2.0)],
            vec![c(1.0, 1.0), c(3.0, 3.0)],
        ];
        let chains = splice_chains(segments);
        // The first candidate wins; the losing segment seeds its own chain.
        assert_eq!(
            chains.first(),
            Some(&vec![c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)])
        );
        assert_eq!(chains.len(), 2);
    }

    #[test]
    fn two_half_squares_assemble_into_one_closed_ring() {
        let segments = vec![
            vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)],
            vec![c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)],
        ];
        let rings = assemble_rings(segments);
        assert_eq!(
            rings,
            vec![vec![
                c(0.0, 0.0),
                c(1.0, 0.0),
                c(1.0, 1.0),
                c(0.0, 1.0),
                c(0.0, 0.0),
            ]]
        );
    }

    #[test]
    fn disjoint_loops_produce_one_ring_each() {
        let segments = vec![
            vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 0.0)],
            vec![c(5.0, 5.0), c(6.0, 5.0), c(6.0, 6.0), c(5.0, 5.0)],
        ];
        let rings = assemble_rings(segments);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|ring| is_closed(ring)));
    }

    #[test]
    fn open_chains_are_force_closed() {
        let segments = vec![vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)]];
        let rings = assemble_rings(segments);
        assert_eq!(
            rings,
            vec![vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 0.0)]]
        );
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![c(1.0, 1.0)])]
    #[case(vec![c(1.0, 1.0), c(2.0, 2.0)])]
    // Pre-closed with only two distinct points: closure does not add a
    // point, so the ring stays below four and is rejected.
    #[case(vec![c(1.0, 1.0), c(2.0, 2.0), c(1.0, 1.0)])]
    fn undersized_fragments_yield_no_ring(#[case] segment: Vec<Coord<f64>>) {
        assert!(assemble_rings(vec![segment]).is_empty());
    }

    #[test]
    fn close_ring_is_idempotent() {
        let ring = vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)];
        let closed = close_ring(ring);
        assert_eq!(close_ring(closed.clone()), closed);
        assert!(is_closed(&closed));
    }
}
