use burn::tensor::{backend::Backend, ElementConversion, Tensor};

/// Index of the maximum value in `values`, preferring the leftmost index on ties
///
/// **Returns** `None` if `values` is empty or all `NaN`. `NaN` values are skipped.
///
/// ### Example
/// ```
/// assert_eq!(predl::argmax(&[3.0, 1.0, 5.0, 5.0]), Some(2));
/// ```
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, x)| !x.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, max)) if x <= max => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
}

/// Index along the leading dimension of the maximum value of `tensor`
///
/// Uses burn's `argmax` over dimension `0` and takes the first element of the resulting indices,
/// so for tensors of rank > 1 this is the best candidate for the first column. Tie-breaking is
/// whatever the backend's reduction does.
pub fn argmax_tensor<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> usize {
    let index = tensor
        .argmax(0)
        .flatten::<1>(0, D - 1)
        .slice([0..1])
        .into_scalar()
        .elem::<i64>();
    index as usize
}
