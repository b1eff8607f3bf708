// SPDX-License-Identifier: AGPL-3.0-or-later

mod api;
mod assets;
mod page;
mod service;

pub use service::{build_server, http_service};
