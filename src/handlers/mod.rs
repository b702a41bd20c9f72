// Handlers are split by security tier, public (no auth) and protected
// (verified token + seller policy), and by resource within each tier.
pub mod protected;
pub mod public;
