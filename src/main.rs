// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Folio replay driver

fn main() -> anyhow::Result<()> {
    folio::run()
}
