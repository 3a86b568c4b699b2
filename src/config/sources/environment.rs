//! Environment source: `DIRTREE_STORAGE__BACKEND=memory` sets `storage.backend`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("DIRTREE")
            .prefix_separator("_")
            .separator("__"),
    )
}
