use crate::classifiers::bayes::class_data::ClassData;

/// Laplace-smoothed P(C_j), indexed like `datas`.
///
/// `(total_j + 1) / (sum_k total_k + n)`; with no training data at all this is
/// the uniform distribution.
pub fn priors<'a, I>(datas: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a ClassData>,
{
    let totals: Vec<f64> = datas.into_iter().map(ClassData::total).collect();
    let n = totals.len() as f64;
    let sum: f64 = totals.iter().sum();
    totals
        .into_iter()
        .map(|total| (total + 1.0) / (sum + n))
        .collect()
}
