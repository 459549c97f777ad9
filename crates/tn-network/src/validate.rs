//! Network validation logic.

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Branch, Endpoint, Node};

/// Validate the network definition: endpoint references exist, every
/// coefficient is in range, no degenerate branch shapes.
pub(crate) fn validate_structure(nodes: &[Node], branches: &[Branch]) -> NetworkResult<()> {
    for node in nodes {
        if !node.capacity.is_finite() || node.capacity < 0.0 {
            return Err(NetworkError::InvalidCapacity {
                node: node.id,
                value: node.capacity,
            });
        }
    }

    for branch in branches {
        if !branch.conductance.is_finite() || branch.conductance <= 0.0 {
            return Err(NetworkError::InvalidConductance {
                branch: branch.id,
                value: branch.conductance,
            });
        }

        for endpoint in [branch.from, branch.to] {
            if let Endpoint::Node(node) = endpoint {
                if node.index() as usize >= nodes.len() {
                    return Err(NetworkError::InvalidNodeRef {
                        branch: branch.id,
                        node,
                    });
                }
            }
        }

        match (branch.from, branch.to) {
            (Endpoint::Boundary, Endpoint::Boundary) => {
                return Err(NetworkError::FloatingBranch { branch: branch.id });
            }
            (Endpoint::Node(a), Endpoint::Node(b)) if a == b => {
                return Err(NetworkError::SelfLoop {
                    branch: branch.id,
                    node: a,
                });
            }
            _ => {}
        }
    }

    Ok(())
}
