//! Latent semantic analysis over a term-by-sentence matrix.
//!
//! Sentences are scored by how strongly they load on the dominant latent
//! topics: `rank_j = sqrt(Σ σ_i² · v_ji²)` where `σ` are the singular values of
//! the matrix and `v` its right singular vectors.

use std::collections::HashMap;

use ndarray::{Array2, Axis};

/// Never keep fewer topics than this, even for tiny documents.
const MIN_DIMENSIONS: usize = 3;
const REDUCTION_RATIO: f64 = 1.0;
const SMOOTHING: f64 = 0.4;

/// QL iterations allowed per eigenvalue.
const MAX_ITERATIONS: usize = 64;

/// Raw counts, one row per distinct term and one column per sentence.
pub fn term_sentence_matrix(sentences: &[Vec<String>]) -> Array2<f64> {
    let mut dictionary: HashMap<&str, usize> = HashMap::new();
    for word in sentences.iter().flatten() {
        let next = dictionary.len();
        dictionary.entry(word.as_str()).or_insert(next);
    }

    let mut matrix = Array2::zeros((dictionary.len(), sentences.len()));
    for (col, words) in sentences.iter().enumerate() {
        for word in words {
            matrix[[dictionary[word.as_str()], col]] += 1.0;
        }
    }
    matrix
}

/// Per-sentence smoothed term frequency: `0.4 + 0.6 * count / max_count`.
pub fn smooth_term_frequency(matrix: &mut Array2<f64>) {
    for mut column in matrix.axis_iter_mut(Axis(1)) {
        let max = column.iter().copied().fold(0.0, f64::max);
        if max > 0.0 {
            column.mapv_inplace(|count| SMOOTHING + (1.0 - SMOOTHING) * count / max);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Descending.
    pub singular_values: Vec<f64>,
    /// Column `i` is the right singular vector for `singular_values[i]`.
    pub right_vectors: Array2<f64>,
}

/// Singular values and right singular vectors of `matrix`, obtained from the
/// eigen-decomposition of its sentence Gram matrix `AᵀA`.
pub fn decompose(matrix: &Array2<f64>) -> Decomposition {
    let gram = matrix.t().dot(matrix);
    let (eigenvalues, eigenvectors) = symmetric_eigen(gram);

    let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    let n = eigenvalues.len();
    let mut right_vectors = Array2::zeros((n, n));
    let mut singular_values = Vec::with_capacity(n);
    for (new, &old) in order.iter().enumerate() {
        right_vectors
            .column_mut(new)
            .assign(&eigenvectors.column(old));
        singular_values.push(eigenvalues[old].max(0.0).sqrt());
    }

    Decomposition {
        singular_values,
        right_vectors,
    }
}

/// Eigen-decomposition of a symmetric matrix: Householder reduction to
/// tridiagonal form followed by implicit QL iterations.
/// Returns the eigenvalues and a matrix whose columns are the eigenvectors.
fn symmetric_eigen(a: Array2<f64>) -> (Vec<f64>, Array2<f64>) {
    let n = a.nrows();
    if n == 0 {
        return (Vec::new(), Array2::zeros((0, 0)));
    }

    // row-major, v[row * n + col]
    let mut v: Vec<f64> = a.iter().copied().collect();
    let mut d = vec![0.0; n];
    let mut e = vec![0.0; n];
    tridiagonalize(&mut v, n, &mut d, &mut e);
    diagonalize(&mut v, n, &mut d, &mut e);

    (d, Array2::from_shape_fn((n, n), |(i, j)| v[i * n + j]))
}

/// Overwrites `v` with the accumulated orthogonal transform, `d` with the
/// diagonal and `e[1..]` with the subdiagonal.
fn tridiagonalize(v: &mut [f64], n: usize, d: &mut [f64], e: &mut [f64]) {
    d.copy_from_slice(&v[(n - 1) * n..]);

    for i in (1..n).rev() {
        let scale: f64 = d[..i].iter().map(|x| x.abs()).sum();
        let mut h = 0.0;

        if scale == 0.0 {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[(i - 1) * n + j];
                v[i * n + j] = 0.0;
                v[j * n + i] = 0.0;
            }
        } else {
            for x in &mut d[..i] {
                *x /= scale;
                h += *x * *x;
            }
            let mut f = d[i - 1];
            let g = if f > 0.0 { -h.sqrt() } else { h.sqrt() };
            e[i] = scale * g;
            h -= f * g;
            d[i - 1] = f - g;
            e[..i].fill(0.0);

            for j in 0..i {
                f = d[j];
                v[j * n + i] = f;
                let mut g = e[j] + v[j * n + j] * f;
                for k in (j + 1)..i {
                    g += v[k * n + j] * d[k];
                    e[k] += v[k * n + j] * f;
                }
                e[j] = g;
            }

            f = 0.0;
            for j in 0..i {
                e[j] /= h;
                f += e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] -= hh * d[j];
            }
            for j in 0..i {
                let (f, g) = (d[j], e[j]);
                for k in j..i {
                    v[k * n + j] -= f * e[k] + g * d[k];
                }
                d[j] = v[(i - 1) * n + j];
                v[i * n + j] = 0.0;
            }
        }
        d[i] = h;
    }

    for i in 0..n - 1 {
        v[(n - 1) * n + i] = v[i * n + i];
        v[i * n + i] = 1.0;
        let h = d[i + 1];
        if h != 0.0 {
            for k in 0..=i {
                d[k] = v[k * n + i + 1] / h;
            }
            for j in 0..=i {
                let g: f64 = (0..=i).map(|k| v[k * n + i + 1] * v[k * n + j]).sum();
                for k in 0..=i {
                    v[k * n + j] -= g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[k * n + i + 1] = 0.0;
        }
    }

    for j in 0..n {
        d[j] = v[(n - 1) * n + j];
        v[(n - 1) * n + j] = 0.0;
    }
    v[(n - 1) * n + n - 1] = 1.0;
    e[0] = 0.0;
}

/// Implicit QL on the tridiagonal form, rotating `v` along so its columns end
/// up as eigenvectors. Eigenvalues are left in `d`, unsorted.
fn diagonalize(v: &mut [f64], n: usize, d: &mut [f64], e: &mut [f64]) {
    e.copy_within(1.., 0);
    e[n - 1] = 0.0;

    let mut shift = 0.0;
    let mut norm = 0.0_f64;
    for l in 0..n {
        norm = norm.max(d[l].abs() + e[l].abs());
        let m = (l..n)
            .find(|&m| e[m].abs() <= f64::EPSILON * norm)
            .unwrap_or(n - 1);

        if m > l {
            for _ in 0..MAX_ITERATIONS {
                let g = d[l];
                let mut p = (d[l + 1] - g) / (2.0 * e[l]);
                let r = if p < 0.0 { -p.hypot(1.0) } else { p.hypot(1.0) };
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let h = g - d[l];
                for x in &mut d[l + 2..] {
                    *x -= h;
                }
                shift += h;

                p = d[m];
                let (mut c, mut c2, mut c3) = (1.0, 1.0, 1.0);
                let (mut s, mut s2) = (0.0, 0.0);
                let el1 = e[l + 1];
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = s;
                    let g = c * e[i];
                    let h = c * p;
                    let r = p.hypot(e[i]);
                    e[i + 1] = s * r;
                    s = e[i] / r;
                    c = p / r;
                    p = c * d[i] - s * g;
                    d[i + 1] = h + s * (c * g + s * d[i]);

                    for row in v.chunks_exact_mut(n) {
                        let h = row[i + 1];
                        row[i + 1] = s * row[i] + c * h;
                        row[i] = c * row[i] - s * h;
                    }
                }
                p = -s * s2 * c3 * el1 * e[l] / dl1;
                e[l] = s * p;
                d[l] = c * p;

                if e[l].abs() <= f64::EPSILON * norm {
                    break;
                }
            }
        }
        d[l] += shift;
        e[l] = 0.0;
    }
}

/// Topic-weighted importance of every sentence, in document order.
pub fn sentence_ranks(sentences: &[Vec<String>]) -> Vec<f64> {
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut matrix = term_sentence_matrix(sentences);
    smooth_term_frequency(&mut matrix);
    let Decomposition {
        singular_values,
        right_vectors,
    } = decompose(&matrix);

    let dimensions = MIN_DIMENSIONS.max((singular_values.len() as f64 * REDUCTION_RATIO) as usize);
    let powered: Vec<f64> = singular_values
        .iter()
        .enumerate()
        .map(|(i, s)| if i < dimensions { s * s } else { 0.0 })
        .collect();

    right_vectors
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .zip(&powered)
                .map(|(v, s2)| s2 * v * v)
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}
