//! Shell of the rotating shift calendar: configuration, caches, feed
//! fetching, persistence, services and the command line.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod feeds;
pub mod news;
pub mod output;
pub mod service;
pub mod storage;
