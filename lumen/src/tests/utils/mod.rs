// Copyright 2026 the Lumen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod label_test;

pub(crate) use asserts::{assert_contiguous, assert_rect_eq};
pub(crate) use label_test::LabelTest;
