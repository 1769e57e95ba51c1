// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        mods / list / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, --set        |
//!              '-------------+-------------'
//!                            v
//!                 manager (ModManager)
//!                            |
//!         +---------+--------+--------+---------+
//!         v         v                 v         v
//!      source      net             archive   library
//!     GitHub    HTTP/DL             zip       store
//!                                               |
//!                                               v
//!                                            linker
//!                                      symlinks into game
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod archive;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod library;
pub mod linker;
pub mod logging;
pub mod manager;
pub mod net;
pub mod source;
