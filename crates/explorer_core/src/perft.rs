use crate::{arena::PositionId, error::ExploreResult, search::SearchContext, types::Move};

/// Perft node count over the arena.
/// Counts the leaves of the legal move tree `depth` plies below `root`.
pub fn perft(ctx: &mut SearchContext, root: PositionId, depth: u8) -> ExploreResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let exploration = ctx.explore(root)?;
    if depth == 1 {
        return Ok(exploration.moves.len() as u64);
    }

    let mut nodes = 0u64;
    for i in 0..exploration.moves.len() {
        let record = ctx.arena().record(exploration.moves, i)?;
        nodes += perft(ctx, record.leads_to, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft split by root move, in generation order.
pub fn divide(
    ctx: &mut SearchContext,
    root: PositionId,
    depth: u8,
) -> ExploreResult<Vec<(Move, u64)>> {
    let records = ctx.legal_moves(root)?.to_vec();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let nodes = perft(ctx, record.leads_to, depth.saturating_sub(1))?;
        out.push((record.mv, nodes));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "perft_tests.rs"]
mod perft_tests;
