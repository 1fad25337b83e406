//! Generated `config.d.ts` type stubs.
//!
//! Re-exports each provider package under its alias and declares the
//! `$config` builder whose `providers` field accepts, per provider name,
//! that provider's arguments or a boolean toggle.

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::fs::write_atomic;
use crate::lockfile::ProviderLock;

/// Type-stub file name inside the platform directory.
pub const TYPE_STUBS_NAME: &str = "config.d.ts";

const PRELUDE: &str = r#"import "./src/global.d.ts"
import "../types.generated"
import { AppInput, App, Config } from "./src/config"
"#;

const CONFIG_BUILDER: &str = r#"  export const $config: (
    input: Omit<Config, "app"> & {
      app(input: AppInput): Omit<App, "providers"> & Providers;
    },
  ) => Config;
}
"#;

/// Render the declarations file. Order follows the lock.
pub fn render_type_stubs(lock: &ProviderLock) -> String {
    let mut out = String::from(PRELUDE);

    for entry in lock {
        let _ = writeln!(out, r#"import * as _{} from "{}";"#, entry.alias, entry.package);
    }

    out.push_str("\n\n");
    out.push_str("declare global {\n");
    for entry in lock {
        out.push_str("  // @ts-expect-error\n");
        let _ = writeln!(out, "  export import {0} = _{0}", entry.alias);
    }

    out.push_str("  interface Providers {\n");
    out.push_str("    providers?: {\n");
    for entry in lock {
        let _ = writeln!(
            out,
            r#"      "{}"?:  (_{}.ProviderArgs & {{ version?: string }}) | boolean;"#,
            entry.name, entry.alias
        );
    }
    out.push_str("    }\n");
    out.push_str("  }\n");
    out.push_str(CONFIG_BUILDER);
    out
}

/// Regenerate the declarations file at `path`.
pub fn write_type_stubs(path: &Path, lock: &ProviderLock) -> Result<()> {
    info!(path = %path.display(), "writing types");
    write_atomic(path, render_type_stubs(lock).as_bytes())
}
