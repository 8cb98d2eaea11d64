// Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: JWT validation injecting a Principal; handlers gate writes
// via Principal::require_editor before touching any payload or the store.

pub mod blocks;
pub mod courses;
pub mod lessons;
pub mod pages;
pub mod subjects;
pub mod topics;
