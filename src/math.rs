use num::Float;

/// Similar to numpy.interp: piecewise-linear interpolation of `x_input` over the
/// `(x, y)` coordinates, which must be sorted by `x`. Values left of the first
/// coordinate (or right of the last) take that coordinate's `y`.
pub(crate) fn interp<F>(x_input: impl IntoIterator<Item = F>, coords: impl IntoIterator<Item = (F, F)>) -> Vec<F>
where
    F: Float,
{
    let coords: Vec<(F, F)> = coords.into_iter().collect();

    x_input
        .into_iter()
        .map(|x| {
            let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
                return F::zero();
            };

            if x <= x_first {
                return y_first;
            }
            if x >= x_last {
                return y_last;
            }

            for pair in coords.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];

                if x1 <= x && x <= x2 {
                    if x2 == x1 {
                        return y2;
                    }
                    return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
                }
            }

            y_last
        })
        .collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];

    assert_eq!(
        interp(x, xs.into_iter().zip(ys)),
        vec![3., 3., 2.5, 0.5599999999999996, 0.]
    );

    let x = [2.5, -1., 7.5];
    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp(x, xs.into_iter().zip(ys)), vec![4., 0., 2.]);
}
