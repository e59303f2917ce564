use std::f64::consts::PI;

/// Quintic smoothstep `x^3 (6x^2 - 15x + 10)`, clamped to `[0, 1]`.
#[inline]
pub fn smootherstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// Error function, Abramowitz & Stegun 7.1.26 (|error| < 1.5e-7).
pub fn erf(x: f32) -> f32 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let x = f64::from(x);
    let sign = x.signum();
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    (sign * (1.0 - poly * (-x * x).exp())) as f32
}

/// Gamma function via the Lanczos approximation (g = 7, 9 terms), with reflection below 0.5.
pub fn gamma_fn(x: f32) -> f32 {
    gamma_f64(f64::from(x)) as f32
}

fn gamma_f64(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma_f64(1.0 - x));
    }

    let x = x - 1.0;
    let mut acc = COEFFS[0];
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + G + 0.5;
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
}

/// Replace values whose magnitude is below `eps` with `eps`, keeping the result non-zero.
///
/// Only valid for even functions of `x` (the sign is dropped).
#[inline]
pub fn fix_zero(x: f32, eps: f32) -> f32 {
    x.abs().max(eps)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
