//! Thin wrapper over the WebAssembly runtime
//!
//! Built with the `wasm-runtime` feature this compiles and instantiates real
//! modules through wasmtime. Without it every call reports `Unsupported`.

use std::time::{Duration, Instant};

use crate::error::BenchResult;

/// Smallest useful module: exports `add(i32, i32) -> i32`
pub const MINIMAL_ADD_MODULE: [u8; 41] = [
    0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00,
    // type section: func(i32, i32) -> i32
    0x01, 0x07, 0x01, 0x60, 0x02, 0x7f, 0x7f, 0x01, 0x7f,
    // function section: one function of type 0
    0x03, 0x02, 0x01, 0x00,
    // export section: "add" -> func 0
    0x07, 0x07, 0x01, 0x03, 0x61, 0x64, 0x64, 0x00, 0x00,
    // code section: local.get 0, local.get 1, i32.add
    0x0a, 0x09, 0x01, 0x07, 0x00, 0x20, 0x00, 0x20, 0x01, 0x6a, 0x0b,
];

/// Metadata of a successfully compiled module
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledModule {
    pub exports: Vec<String>,
    pub compile_time: Duration,
}

/// Whether this build can compile WebAssembly at all
pub const fn runtime_available() -> bool {
    cfg!(feature = "wasm-runtime")
}

#[cfg(feature = "wasm-runtime")]
pub struct WasmRuntime {
    engine: wasmtime::Engine,
}

#[cfg(feature = "wasm-runtime")]
impl WasmRuntime {
    pub fn new() -> BenchResult<Self> {
        Ok(Self {
            engine: wasmtime::Engine::default(),
        })
    }

    /// Parse, validate and compile a module
    pub fn compile(&self, bytes: &[u8]) -> BenchResult<CompiledModule> {
        let start = Instant::now();
        let module = wasmtime::Module::new(&self.engine, bytes).map_err(crate::error::wasm_error)?;
        let compile_time = start.elapsed();

        Ok(CompiledModule {
            exports: module.exports().map(|export| export.name().to_string()).collect(),
            compile_time,
        })
    }

    /// Compile, instantiate and call the exported `add`
    pub fn call_add(&self, bytes: &[u8], a: i32, b: i32) -> BenchResult<i32> {
        use crate::error::wasm_error;

        let module = wasmtime::Module::new(&self.engine, bytes).map_err(wasm_error)?;
        let mut store = wasmtime::Store::new(&self.engine, ());
        let instance = wasmtime::Instance::new(&mut store, &module, &[]).map_err(wasm_error)?;
        let add = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, "add")
            .map_err(wasm_error)?;
        add.call(&mut store, (a, b)).map_err(wasm_error)
    }
}

#[cfg(not(feature = "wasm-runtime"))]
pub struct WasmRuntime;

#[cfg(not(feature = "wasm-runtime"))]
impl WasmRuntime {
    pub fn new() -> BenchResult<Self> {
        Err(unavailable())
    }

    pub fn compile(&self, _bytes: &[u8]) -> BenchResult<CompiledModule> {
        Err(unavailable())
    }

    pub fn call_add(&self, _bytes: &[u8], _a: i32, _b: i32) -> BenchResult<i32> {
        Err(unavailable())
    }
}

#[cfg(not(feature = "wasm-runtime"))]
fn unavailable() -> crate::error::BenchError {
    crate::error::BenchError::Unsupported {
        message: "built without the wasm-runtime feature".to_string(),
    }
}

/// One-shot compile + instantiate + `add(1, 2) == 3` check
pub fn compile_and_verify(bytes: &[u8]) -> BenchResult<Duration> {
    let start = Instant::now();
    let runtime = WasmRuntime::new()?;
    let sum = runtime.call_add(bytes, 1, 2)?;
    if sum != 3 {
        return Err(crate::error::wasm_error(format!(
            "validity check failed: add(1, 2) returned {}",
            sum
        )));
    }
    Ok(start.elapsed())
}

#[cfg(all(test, feature = "wasm-runtime"))]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_module_compiles() {
        let runtime = WasmRuntime::new().unwrap();
        let compiled = runtime.compile(&MINIMAL_ADD_MODULE).unwrap();
        assert_eq!(compiled.exports, vec!["add".to_string()]);
    }

    #[test]
    fn test_add_is_callable() {
        let runtime = WasmRuntime::new().unwrap();
        assert_eq!(runtime.call_add(&MINIMAL_ADD_MODULE, 40, 2).unwrap(), 42);
        assert!(compile_and_verify(&MINIMAL_ADD_MODULE).is_ok());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let runtime = WasmRuntime::new().unwrap();
        assert!(runtime.compile(b"not wasm at all").is_err());
        assert!(compile_and_verify(&MINIMAL_ADD_MODULE[..20]).is_err());
    }
}
