//! Client/server price reconciliation.
//!
//! Clients compute a fare estimate locally for a responsive preview; the
//! server recomputes it and decides which figure is authoritative. This only
//! defends against gross under/over-statement — a client that sets its
//! estimate equal to the server fare passes trivially — so it must be paired
//! with server-side authorization, which is outside this engine.

/// True iff the client estimate is within the 10% tolerance band of the
/// server fare.
///
/// Integer form of `|client − server| <= server × 0.10`; at `server == 0`
/// the band collapses so only `client == 0` passes.
#[must_use]
pub const fn within_tolerance(client_price: u32, server_price: u32) -> bool {
    let diff = client_price.abs_diff(server_price);
    (diff as u64) * 10 <= server_price as u64
}

/// Choose the authoritative pre-tip fare and add the tip.
///
/// The client estimate is trusted when it is within tolerance of the server
/// fare; otherwise the server fare is substituted. The tip comes straight
/// off the request body, so the addition saturates rather than wraps.
#[must_use]
pub const fn reconcile(client_price: u32, server_price: u32, tip: u32) -> u32 {
    let chosen = if within_tolerance(client_price, server_price) {
        client_price
    } else {
        server_price
    };
    chosen.saturating_add(tip)
}
