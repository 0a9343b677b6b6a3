use serde::Serialize;

/// One simulated delivery-and-execution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub color: &'static str,
}

impl Configuration {
    const fn new(
        id: &'static str,
        name: &'static str,
        desc: &'static str,
        color: &'static str,
    ) -> Self {
        Self { id, name, desc, color }
    }
}

/// Every known configuration, in display order
pub static CONFIGURATIONS: [Configuration; 23] = [
    // Baseline delivery
    Configuration::new("js_inline", "Inline Script (HTML)", "Standard JS embedded directly in HTML", "#f1e05a"),
    Configuration::new("js_external", "External .js File", "Standard JS loaded from external file", "#f0db4f"),
    Configuration::new("js_wasm_std", "JS + WASM (Standard)", "Vanilla JS loading standard WASM module", "#654ff0"),

    // Optimizers
    Configuration::new("js_terser", "JS + Terser", "Standard minification", "#fab1a0"),
    Configuration::new("js_closure", "Google Closure (Adv)", "Advanced optimizations", "#e17055"),
    Configuration::new("js_roadroller", "JS + Roadroller", "Heavy compression (Packer)", "#d63031"),

    Configuration::new("wasm_opt", "WASM + wasm-opt", "Binaryen optimization passes", "#0984e3"),
    Configuration::new("wasmedge_aot", "WasmEdge AOT", "Ahead-of-Time native compilation", "#00cec9"),

    // Integer math and toolchains
    Configuration::new("js_bigint", "JS BigInt Math", "Pure JS using BigInt primitives", "#f7df1e"),
    Configuration::new("wasm_i64", "WASM i64 (Native)", "WASM native 64-bit integer ops", "#654ff0"),
    Configuration::new("wasm_rust", "Rust (wasm-pack)", "Rust compiled via LLVM", "#dea584"),
    Configuration::new("wasm_cheerp", "Cheerp (C++)", "C++ compiled via Cheerp", "#d63031"),
    Configuration::new("wasm_as", "AssemblyScript", "TypeScript-like syntax to WASM", "#007acc"),
    Configuration::new("wasm_asc", "AssemblyScript (asc)", "AssemblyScript build (asc)", "#007acc"),
    Configuration::new("wasm_asc_opt", "AssemblyScript + Opt", "ASC + wasm-opt", "#0984e3"),

    // Hardware features
    Configuration::new("wasm_simd", "WASM + SIMD128", "Parallel vector operations enabled", "#2ecc71"),
    Configuration::new("wasm_threads", "WASM + Threads", "Multithreaded via SharedArrayBuffer", "#e84393"),
    Configuration::new("wasm_openmp", "WASM + OpenMP", "OMP Runtime + libomp.a", "#ff0000"),
    Configuration::new("wasm_max", "WASM Max (OMP+SIMD)", "OpenMP Threads + SIMD128 Vectorization", "#ff0000"),

    // GPU compute
    Configuration::new("webgl_compute", "WebGL Compute", "GPU acceleration via WebGL shaders", "#00d4ff"),
    Configuration::new("webgpu_compute", "WebGPU Compute", "Massive parallel WGSL shaders", "#8e44ad"),

    // Custom loaders
    Configuration::new("utf16_1ijs", "UTF-16 1ijs + WASM", "Custom 1ijs format with WASM payload", "#e05a33"),
    Configuration::new("utf16_html", "UTF-16 HTML Loader", "Full UTF-16 HTML document loading 1ijs", "#c0392b"),
];

/// All configurations in display order
pub fn all() -> &'static [Configuration] {
    &CONFIGURATIONS
}

/// Find a configuration by id
pub fn find(id: &str) -> Option<&'static Configuration> {
    CONFIGURATIONS.iter().find(|config| config.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_find() {
        let config = find("wasm_threads").expect("wasm_threads is in the catalog");
        assert_eq!(config.name, "WASM + Threads");
        assert_eq!(config.color, "#e84393");

        assert!(find("totally_unknown_id").is_none());
    }

    #[test]
    fn test_serializes_flat_record() {
        let value = serde_json::to_value(find("js_inline").unwrap()).unwrap();
        assert_eq!(value["id"], "js_inline");
        assert_eq!(value["name"], "Inline Script (HTML)");
        assert_eq!(value["desc"], "Standard JS embedded directly in HTML");
        assert_eq!(value["color"], "#f1e05a");
    }
}
