use std::env;
use std::fs;
use std::path::Path;

/// Embedded datasets: (source file, OUT_DIR name, presence flag).
const DATASETS: [(&str, &str, &str); 2] = [
    ("../data/df_final.csv", "df_final.csv", "BWQ_HISTORY_PRESENT"),
    (
        "../data/future_week_forecast.csv",
        "future_week_forecast.csv",
        "BWQ_FORECAST_PRESENT",
    ),
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy each dataset to OUT_DIR for include_str. A missing file is embedded
    // empty and flagged absent, so the app takes its "not found" path instead
    // of failing the build.
    for (src, name, flag) in DATASETS {
        let src = Path::new(src);
        let dest = Path::new(&out_dir).join(name);
        let present = src.exists();
        if present {
            fs::copy(src, &dest).unwrap();
        } else {
            fs::write(&dest, "").unwrap();
        }
        println!("cargo:rustc-env={}={}", flag, if present { "1" } else { "0" });
        println!("cargo:rerun-if-changed={}", src.display());
    }

    println!("cargo:rerun-if-changed=build.rs");
}
