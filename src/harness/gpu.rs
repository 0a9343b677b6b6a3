//! GPU-class workloads on the CPU
//!
//! Baselines for the shader versions the browser UI runs: a large matrix
//! product (serial and data-parallel), a particle integrator, a 3x3
//! convolution and a sphere ray marcher.

use std::hint::black_box;

use rayon::prelude::*;
use rand::Rng;

use crate::harness::cpu::{matrix_multiply, random_matrix};
use crate::harness::{BenchmarkSuite, Harness};
use crate::results::TestResult;

pub struct GpuBenchmark;

impl GpuBenchmark {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GpuBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
}

/// Row-parallel matrix product
pub fn matrix_multiply_parallel(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let inner = b.len();
    let cols = b.first().map_or(0, |row| row.len());

    a.par_iter()
        .map(|row| {
            (0..cols)
                .map(|j| (0..inner).map(|k| row[k] * b[k][j]).sum())
                .collect()
        })
        .collect()
}

pub fn spawn_particles<R: Rng>(rng: &mut R, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: rng.gen::<f64>() * 1000.0,
            y: rng.gen::<f64>() * 1000.0,
            vx: (rng.gen::<f64>() - 0.5) * 2.0,
            vy: (rng.gen::<f64>() - 0.5) * 2.0,
            mass: rng.gen::<f64>() * 10.0 + 1.0,
        })
        .collect()
}

/// Integrate positions; velocity is damped and reflected outside [0, 1000]
pub fn particle_simulation(particles: &mut [Particle], steps: usize) {
    for _ in 0..steps {
        for p in particles.iter_mut() {
            p.x += p.vx;
            p.y += p.vy;

            if p.x < 0.0 || p.x > 1000.0 {
                p.vx *= -0.9;
            }
            if p.y < 0.0 || p.y > 1000.0 {
                p.vy *= -0.9;
            }
        }
    }
}

/// 3x3 edge-detection kernel over RGBA data; border pixels stay zero
pub fn image_convolution(image: &[f32], width: usize, height: usize) -> Vec<f32> {
    const KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

    let mut output = vec![0.0f32; width * height * 4];
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            for c in 0..3 {
                let mut sum = 0.0;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let idx = ((y + ky - 1) * width + (x + kx - 1)) * 4 + c;
                        sum += image[idx] * KERNEL[ky * 3 + kx];
                    }
                }
                output[(y * width + x) * 4 + c] = sum;
            }
            output[(y * width + x) * 4 + 3] = 1.0;
        }
    }
    output
}

/// March rays from the origin towards a unit sphere; hit pixels store
/// `1 - step / steps`
pub fn ray_marching(width: usize, height: usize, steps: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let dx = (x as f64 / width as f64 - 0.5) * 2.0;
            let dy = (y as f64 / height as f64 - 0.5) * 2.0;

            let mut t = 0.0f64;
            for i in 0..steps {
                let (px, py, pz) = (dx * t, dy * t, t);
                let dist = (px * px + py * py + pz * pz).sqrt() - 1.0;

                if dist < 0.001 {
                    output[y * width + x] = 1.0 - (i as f32 / steps as f32);
                    break;
                }

                t += dist.max(0.01);
                if t > 10.0 {
                    break;
                }
            }
        }
    }
    output
}

impl BenchmarkSuite for GpuBenchmark {
    fn category(&self) -> &'static str {
        "GPU"
    }

    fn descriptions(&self) -> &'static [&'static str] {
        &[
            "Matrix Multiply CPU: 256x256 matrix multiplication (baseline)",
            "Matrix Multiply Parallel: 256x256 split across worker threads",
            "Particle Simulation CPU: 1000 particles simulation",
            "Image Convolution CPU: 512x512 convolution filter",
            "Ray Marching CPU: 256x256 ray marching",
        ]
    }

    fn run(&self, harness: &Harness) -> Vec<TestResult> {
        let mut rng = rand::thread_rng();
        let a = random_matrix(&mut rng, 256);
        let b = random_matrix(&mut rng, 256);
        let image: Vec<f32> = (0..512 * 512 * 4).map(|_| rng.gen()).collect();

        let mut results = Vec::with_capacity(5);
        results.push(harness.measure("Matrix Multiply CPU (256x256)", || {
            black_box(matrix_multiply(&a, &b));
            Ok(())
        }));
        results.push(harness.measure("Matrix Multiply Parallel (256x256)", || {
            black_box(matrix_multiply_parallel(&a, &b));
            Ok(())
        }));
        results.push(harness.measure("Particle Simulation CPU (1000 particles, 10 steps)", || {
            let mut particles = spawn_particles(&mut rng, 1_000);
            particle_simulation(&mut particles, 10);
            black_box(particles);
            Ok(())
        }));
        results.push(harness.measure("Image Convolution CPU (512x512)", || {
            black_box(image_convolution(&image, 512, 512));
            Ok(())
        }));
        results.push(harness.measure("Ray Marching CPU (256x256, 50 steps)", || {
            black_box(ray_marching(256, 256, 50));
            Ok(())
        }));

        results
    }
}
