//! End-to-end tests for samplers, parameter sharing and field-of-view
//! transforms.

use medaug::random::{get_rng, SampleShape, Sampler};
use medaug::transforms::{
    Config, CropTransform, FlipTransform, PadTransform, PatchTransform, PowerTwoTransform,
    RandomFlipTransform, RandomPatchTransform, RandomizedTransform, SharePolicy, Side,
    Transform, Unit,
};
use medaug::{Bound, Error, Sample};
use ndarray::{ArrayD, Axis, IxDyn, Slice};

/// Ramp volume with distinct voxel values
fn create_test_volume(shape: &[usize]) -> ArrayD<f32> {
    let n: usize = shape.iter().product();
    ArrayD::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f32).collect()).unwrap()
}

#[test]
fn test_centered_patch_on_even_extent() {
    let mut rng = get_rng(Some(0));
    let x = create_test_volume(&[1, 6]);
    let y = PatchTransform::new(&[4]).call(&x, &mut rng).unwrap();
    assert_eq!(y, x.slice_axis(Axis(1), Slice::from(0..4usize)).to_owned());
}

#[test]
fn test_patch_output_size_invariant() {
    let x = create_test_volume(&[1, 7, 3, 12]);
    for size in [1usize, 3, 7, 15] {
        for center in [-1.0, -0.3, 0.0, 0.6, 1.0] {
            let t = PatchTransform::new(&[size]).center(&[center]);
            let region = t.get_parameters(&x, &mut get_rng(None)).unwrap();
            for ((range, &(before, after)), &extent) in
                region.crop.iter().zip(&region.padding).zip(&[7, 3, 12])
            {
                assert_eq!(range.len() + before + after, size);
                assert!(range.len() <= extent);
            }
            let y = t.apply_transform(&x, &region).unwrap();
            assert_eq!(y.shape(), &[1, size, size, size]);
        }
    }
}

#[test]
fn test_random_thin_patch_never_fails() {
    let x = create_test_volume(&[1, 16, 16, 16]);
    for bound in [Bound::Constant, Bound::Replicate, Bound::Dct1, Bound::Dct2, Bound::Dft] {
        let t = RandomPatchTransform::new(&[8, 8, 1]).bound(bound);
        for seed in 0..500 {
            let y = t.call(&x, &mut get_rng(Some(seed))).unwrap();
            assert_eq!(y.shape(), &[1, 8, 8, 1], "seed {}, bound {}", seed, bound);
        }
    }
}

#[test]
fn test_single_voxel_patch_at_left_edge() {
    let mut rng = get_rng(Some(0));
    let x = create_test_volume(&[1, 10]);
    let y = PatchTransform::new(&[1])
        .center(&[-1.0])
        .call(&x, &mut rng)
        .unwrap();
    assert_eq!(y.shape(), &[1, 1]);
    assert_eq!(y[[0, 0]], 0.0);
}

#[test]
fn test_pad_then_crop_is_identity() {
    let mut rng = get_rng(Some(1));
    let x = create_test_volume(&[2, 5, 4]);
    for side in [Some(Side::Pre), Some(Side::Post), Some(Side::Both)] {
        for bound in [Bound::Constant, Bound::Replicate, Bound::Dct1, Bound::Dct2, Bound::Dft] {
            let padded = PadTransform::new(vec![3.0, 2.0])
                .side(side)
                .bound(bound)
                .call(&x, &mut rng)
                .unwrap();
            let back = CropTransform::new(vec![3.0, 2.0])
                .side(side)
                .call(&padded, &mut rng)
                .unwrap();
            assert_eq!(back, x, "side {:?}, bound {}", side, bound);
        }
    }
}

#[test]
fn test_two_sided_pad_then_crop_is_identity() {
    let mut rng = get_rng(Some(1));
    let x = create_test_volume(&[1, 5, 4]);
    let amounts = vec![1.0, 0.0, 2.0, 3.0];
    let padded = PadTransform::new(amounts.clone())
        .side(None)
        .call(&x, &mut rng)
        .unwrap();
    assert_eq!(padded.shape(), &[1, 6, 9]);
    let back = CropTransform::new(amounts)
        .side(None)
        .call(&padded, &mut rng)
        .unwrap();
    assert_eq!(back, x);
}

#[test]
fn test_percent_crop() {
    let mut rng = get_rng(Some(0));
    let x = create_test_volume(&[1, 10, 20]);
    let y = CropTransform::new(vec![0.15])
        .unit(Unit::Percent)
        .side(Some(Side::Pre))
        .call(&x, &mut rng)
        .unwrap();
    // ceil(1.5) = 2, ceil(3.0) = 3
    assert_eq!(y.shape(), &[1, 8, 17]);
}

#[test]
fn test_shared_patch_same_location() {
    let mut rng = get_rng(Some(7));
    let a = create_test_volume(&[1, 16, 16]);
    let b = a.mapv(|v| v * 2.0);
    let out = RandomPatchTransform::new(&[5])
        .call_many(&[a, b], &mut rng)
        .unwrap();
    assert_eq!(out[1], out[0].mapv(|v| v * 2.0));
}

#[test]
fn test_independent_patch_differs_for_some_seed() {
    let a = create_test_volume(&[1, 32, 32]);
    let b = a.clone();
    let differs = (0..20).any(|seed| {
        let out = RandomPatchTransform::new(&[4])
            .with_policy(SharePolicy::Channels)
            .call_many(&[a.clone(), b.clone()], &mut get_rng(Some(seed)))
            .unwrap();
        out[0] != out[1]
    });
    assert!(differs);
}

#[test]
fn test_tensor_shared_flip_per_channel() {
    let a = create_test_volume(&[3, 4, 4, 4]);
    let b = a.mapv(|v| -v);
    let mut rng = get_rng(Some(21));
    let out = RandomFlipTransform::new()
        .with_policy(SharePolicy::Tensors)
        .call_many(&[a, b], &mut rng)
        .unwrap();
    assert_eq!(out[1], out[0].mapv(|v| -v));
}

#[test]
fn test_power_two_rounds_up() {
    let mut rng = get_rng(Some(0));
    let x = create_test_volume(&[2, 10, 8, 17]);
    let y = PowerTwoTransform::new(&[3]).call(&x, &mut rng).unwrap();
    assert_eq!(y.shape(), &[2, 16, 8, 24]);
}

#[test]
fn test_flip_twice_is_identity() {
    let mut rng = get_rng(Some(0));
    let x = create_test_volume(&[2, 3, 4]);
    let flip = FlipTransform::new().axis(vec![1, -1]);
    let once = flip.call(&x, &mut rng).unwrap();
    assert_ne!(once, x);
    assert_eq!(flip.call(&once, &mut rng).unwrap(), x);
}

#[test]
fn test_same_seed_same_output() {
    let x = create_test_volume(&[1, 20, 20]);
    let t = RandomizedTransform::new(
        PatchTransform::new(&[8]),
        Config::new()
            .with("shape", Sampler::randint(4, 12).unwrap())
            .with("center", Sampler::uniform(-1.0, 1.0).unwrap()),
    );
    let a = t.call(&x, &mut get_rng(Some(99))).unwrap();
    let b = t.call(&x, &mut get_rng(Some(99))).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_fixed_sampler_is_deterministic() {
    let mut rng = get_rng(Some(0));
    let s = Sampler::fixed(2.5);
    assert_eq!(s.sample(&mut rng, SampleShape::One).unwrap(), Sample::Scalar(2.5));
    assert_eq!(s.sample_n(&mut rng, 3).unwrap(), vec![2.5; 3]);
    let dense = s
        .sample(&mut rng, SampleShape::Shape(vec![2, 3]))
        .unwrap()
        .into_array()
        .unwrap();
    assert!(dense.iter().all(|&v| v == 2.5));
}

#[test]
fn test_sampler_ranges_hold() {
    let mut rng = get_rng(Some(3));
    let uniform = Sampler::uniform(-2.0, 3.0).unwrap();
    let randint = Sampler::randint(1, 6).unwrap();
    for _ in 0..10_000 {
        let u = uniform.sample_one(&mut rng).unwrap().as_scalar().unwrap();
        assert!((-2.0..=3.0).contains(&u));
        let r = randint.sample_one(&mut rng).unwrap().as_scalar().unwrap();
        assert!((1.0..=6.0).contains(&r) && r.fract() == 0.0);
    }
}

#[test]
fn test_rand_k_from_without_replacement() {
    let mut rng = get_rng(Some(4));
    assert!(matches!(
        Sampler::rand_k_from([1.0, 2.0], Some(3), false),
        Err(Error::Configuration(_))
    ));
    let s = Sampler::rand_k_from((0..10).map(f64::from), Some(4), false).unwrap();
    let mut picks = s.sample_one(&mut rng).unwrap().to_list();
    assert_eq!(picks.len(), 4);
    picks.sort_by(f64::total_cmp);
    picks.dedup();
    assert_eq!(picks.len(), 4);
}

#[test]
fn test_config_from_json_drives_patch() {
    let config: Config = serde_json::from_str(
        r#"{
            "shape": {"kind": "rand_int", "min": 3, "max": 5},
            "center": [0.0, 0.5]
        }"#,
    )
    .unwrap();
    let t = RandomizedTransform::new(PatchTransform::default().bound(Bound::Dft), config);
    let x = create_test_volume(&[1, 9, 9]);
    let y = t.call(&x, &mut get_rng(Some(5))).unwrap();
    let side = y.shape()[1];
    assert!((3..=5).contains(&side));
    assert_eq!(y.shape(), &[1, side, side]);
}

#[test]
fn test_sampler_json_roundtrip_names() {
    let s: Sampler = serde_json::from_str(r#"{"kind": "normal", "mu": [0.0, 1.0]}"#).unwrap();
    assert_eq!(s, Sampler::normal(vec![0.0, 1.0], 1.0).unwrap());
    let k: Sampler =
        serde_json::from_str(r#"{"kind": "rand_k_from", "range": [-3, -2, -1]}"#).unwrap();
    assert_eq!(k, Sampler::rand_k_from([-3.0, -2.0, -1.0], None, false).unwrap());
}

#[test]
fn test_invalid_sampler_json_is_rejected() {
    let too_many = r#"{"kind": "rand_k_from", "range": [1, 2], "k": 3}"#;
    assert!(serde_json::from_str::<Sampler>(too_many).is_err());
    let inverted = r#"{"kind": "uniform", "min": 5, "max": 1}"#;
    assert!(serde_json::from_str::<Sampler>(inverted).is_err());
    let empty = r#"{"kind": "rand_k_from", "range": []}"#;
    assert!(serde_json::from_str::<Sampler>(empty).is_err());
    assert!(serde_json::from_str::<Config>(&format!(r#"{{"axis": {}}}"#, too_many)).is_err());

    let valid = Sampler::uniform(1.0, 5.0).unwrap();
    let text = serde_json::to_string(&valid).unwrap();
    assert_eq!(serde_json::from_str::<Sampler>(&text).unwrap(), valid);
}
