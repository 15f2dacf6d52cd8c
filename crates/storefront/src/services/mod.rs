//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Password authentication
//! - `catalog` - Cached product catalog reads
//! - `stripe` - Hosted checkout session creation
//! - `mailer` - Contact form mail relay

pub mod auth;
pub mod catalog;
pub mod mailer;
pub mod stripe;
