// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! No library surface of its own; this crate exists to host the
//! integration tests under `tests/` that exercise `nova_vm` end to end
//! (see §8's testable-properties scenarios).
