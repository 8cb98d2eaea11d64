// Handler tiers
//
// Public (no auth): service info and health, assembled directly in main.
// Protected (JWT auth): everything under /api/*; write operations
// additionally require an editor or admin principal.

pub mod protected;
