//! Bot, progression engine and dashboard backend.
//!
//! The Discord bot and the dashboard API share one `AppState` and one SQLite database. Serenity
//! drives the bot, Axum serves the dashboard and SeaORM handles persistence.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Gateway event handlers, slash and prefix commands, button components
//! - **Progression** (`progression/`) - Pure XP, level, streak, quest and unlock rules
//! - **Session** (`session/`) - In-memory countdowns, polls and quiz rounds
//! - **Controller Layer** (`controller/`) - Dashboard HTTP handlers and DTO conversion
//! - **Service Layer** (`service/`) - Loads progress, applies progression rules, persists results
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Dashboard token guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Tracing, database and catalog initialization
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Periodic sweep of stale sessions and expired rounds
//!
//! # Progress Update Flow
//!
//! 1. A gateway event, command or dashboard request names a guild member
//! 2. The service takes the member's lock and loads their progress
//! 3. Progression rules mutate the record and report events
//! 4. The service saves the record and releases the lock
//! 5. The caller announces the events or returns them as a DTO

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod progression;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod session;
pub mod startup;
pub mod state;
pub mod util;
