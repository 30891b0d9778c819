//! Bounded Nelder-Mead simplex minimisation for model parameter estimation.

use std::cmp::Ordering;

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance, applied both to the spread of objective values
    /// (relative to the best value) and to the simplex diameter.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrinkage coefficient.
    pub sigma: f64,
    /// Initial simplex step size.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tolerance: 1e-9,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.1,
        }
    }
}

/// Result of a Nelder-Mead run.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// Best point found.
    pub optimal_point: Vec<f64>,
    /// Objective value at the best point.
    pub optimal_value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether a convergence criterion was met before `max_iter`.
    pub converged: bool,
}

struct Simplex<'a> {
    vertices: Vec<Vec<f64>>,
    values: Vec<f64>,
    bounds: Option<&'a [(f64, f64)]>,
}

impl Simplex<'_> {
    /// Vertex indices ordered best to worst.
    fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.vertices.len()).collect();
        order.sort_by(|&a, &b| {
            self.values[a]
                .partial_cmp(&self.values[b])
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    fn centroid_without(&self, excluded: usize) -> Vec<f64> {
        let dim = self.vertices[0].len();
        let count = (self.vertices.len() - 1) as f64;
        let mut centroid = vec![0.0; dim];
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i == excluded {
                continue;
            }
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / count;
            }
        }
        centroid
    }

    fn diameter(&self, centre: &[f64]) -> f64 {
        self.vertices
            .iter()
            .map(|v| distance(v, centre))
            .fold(0.0, f64::max)
    }

    fn clamp(&self, mut point: Vec<f64>) -> Vec<f64> {
        if let Some(bounds) = self.bounds {
            for (x, (lo, hi)) in point.iter_mut().zip(bounds) {
                *x = x.clamp(*lo, *hi);
            }
        }
        point
    }
}

/// Minimise `objective` starting from `initial`.
///
/// Non-finite objective values are treated as `+inf`, so the simplex moves
/// away from regions where the objective is undefined. When `bounds` is
/// given every trial point is clamped into the box before evaluation.
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let eval = |x: &[f64]| {
        let v = objective(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    let mut simplex = Simplex {
        vertices: Vec::with_capacity(n + 1),
        values: Vec::with_capacity(n + 1),
        bounds,
    };

    let start = simplex.clamp(initial.to_vec());
    simplex.vertices.push(start.clone());
    for i in 0..n {
        let mut vertex = start.clone();
        let step = if start[i].abs() > 1e-10 {
            config.initial_step * start[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        let mut vertex = simplex.clamp(vertex);
        // A vertex pinned on an upper bound is mirrored inward instead.
        if (vertex[i] - start[i]).abs() < f64::EPSILON {
            vertex[i] = start[i] - step;
            vertex = simplex.clamp(vertex);
        }
        simplex.vertices.push(vertex);
    }
    simplex.values = simplex.vertices.iter().map(|v| eval(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let order = simplex.ranking();
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        let spread = simplex.values[worst] - simplex.values[best];
        let scale = simplex.values[best].abs().max(1.0);
        if spread.is_finite() && spread <= config.tolerance * scale {
            converged = true;
            break;
        }

        let centroid = simplex.centroid_without(worst);
        if simplex.diameter(&centroid) < config.tolerance {
            converged = true;
            break;
        }

        let towards = |from: &[f64], to: &[f64], coef: f64| -> Vec<f64> {
            from.iter().zip(to).map(|(f, t)| f + coef * (t - f)).collect()
        };

        let reflected = simplex.clamp(towards(&centroid, &simplex.vertices[worst], -config.alpha));
        let reflected_value = eval(&reflected);

        if reflected_value < simplex.values[best] {
            let expanded = simplex.clamp(towards(&centroid, &reflected, config.gamma));
            let expanded_value = eval(&expanded);
            if expanded_value < reflected_value {
                simplex.vertices[worst] = expanded;
                simplex.values[worst] = expanded_value;
            } else {
                simplex.vertices[worst] = reflected;
                simplex.values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < simplex.values[second_worst] {
            simplex.vertices[worst] = reflected;
            simplex.values[worst] = reflected_value;
            continue;
        }

        let (contracted, accept_below) = if reflected_value < simplex.values[worst] {
            (
                simplex.clamp(towards(&centroid, &reflected, config.rho)),
                reflected_value,
            )
        } else {
            (
                simplex.clamp(towards(&centroid, &simplex.vertices[worst], config.rho)),
                simplex.values[worst],
            )
        };
        let contracted_value = eval(&contracted);
        if contracted_value < accept_below {
            simplex.vertices[worst] = contracted;
            simplex.values[worst] = contracted_value;
            continue;
        }

        let anchor = simplex.vertices[best].clone();
        for i in 0..=n {
            if i == best {
                continue;
            }
            let shrunk = simplex.clamp(towards(&anchor, &simplex.vertices[i], config.sigma));
            simplex.values[i] = eval(&shrunk);
            simplex.vertices[i] = shrunk;
        }
    }

    let best = simplex.ranking()[0];
    NelderMeadResult {
        optimal_point: simplex.vertices[best].clone(),
        optimal_value: simplex.values[best],
        iterations,
        converged,
    }
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nelder_mead_quadratic_2d() {
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], 2.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_point[1], 3.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_value, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn nelder_mead_respects_bounds() {
        let result = nelder_mead(
            |x| (x[0] - 5.0).powi(2),
            &[0.5],
            Some(&[(-0.99, 0.99)]),
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], 0.99, epsilon = 1e-6);
    }

    #[test]
    fn nelder_mead_starts_on_upper_bound() {
        let result = nelder_mead(
            |x| (x[0] + 0.5).powi(2),
            &[0.99],
            Some(&[(-0.99, 0.99)]),
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], -0.5, epsilon = 1e-3);
    }

    #[test]
    fn nelder_mead_avoids_undefined_regions() {
        // sqrt is undefined for negative x; minimum of (sqrt(x) - 1)^2 at x = 1
        let result = nelder_mead(
            |x| (x[0].sqrt() - 1.0).powi(2),
            &[4.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.optimal_value.is_finite());
        assert_relative_eq!(result.optimal_point[0], 1.0, epsilon = 1e-2);
    }

    #[test]
    fn nelder_mead_large_objective_scale_converges() {
        let result = nelder_mead(
            |x| 1e9 + (x[0] - 0.3).powi(2) + (x[1] + 0.2).powi(2),
            &[0.1, 0.1],
            Some(&[(-0.99, 0.99), (-0.99, 0.99)]),
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert!(result.iterations < 2000);
    }

    #[test]
    fn nelder_mead_empty_initial() {
        let result = nelder_mead(|_| 0.0, &[], None, NelderMeadConfig::default());

        assert!(!result.converged);
        assert!(result.optimal_value.is_nan());
    }

    #[test]
    fn nelder_mead_iteration_cap() {
        let config = NelderMeadConfig {
            max_iter: 3,
            tolerance: 0.0,
            ..Default::default()
        };
        let result = nelder_mead(|x| (x[0] - 100.0).powi(2), &[0.0], None, config);

        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }
}
