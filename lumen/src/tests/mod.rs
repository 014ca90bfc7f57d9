// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_hit_test;
mod test_layout;
mod test_selection;
mod utils;
