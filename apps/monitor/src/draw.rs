use posture_infer::pose::{KeypointIndex, PoseDetection};

const FACE_COLOR: [u8; 3] = [0, 255, 255];
const TORSO_COLOR: [u8; 3] = [0, 255, 0];
const ARM_COLOR: [u8; 3] = [255, 255, 0];
const LEG_COLOR: [u8; 3] = [255, 0, 255];
const NECK_COLOR: [u8; 3] = [255, 255, 255];
const DOT_COLOR: [u8; 3] = [255, 255, 255];

/// COCO 17-keypoint skeleton, one color per limb group.
const SKELETON: [(KeypointIndex, KeypointIndex, [u8; 3]); 18] = {
    use KeypointIndex::*;
    [
        (Nose, LeftEye, FACE_COLOR),
        (Nose, RightEye, FACE_COLOR),
        (LeftEye, LeftEar, FACE_COLOR),
        (RightEye, RightEar, FACE_COLOR),
        (LeftShoulder, RightShoulder, TORSO_COLOR),
        (LeftShoulder, LeftHip, TORSO_COLOR),
        (RightShoulder, RightHip, TORSO_COLOR),
        (LeftHip, RightHip, TORSO_COLOR),
        (LeftShoulder, LeftElbow, ARM_COLOR),
        (RightShoulder, RightElbow, ARM_COLOR),
        (LeftElbow, LeftWrist, ARM_COLOR),
        (RightElbow, RightWrist, ARM_COLOR),
        (LeftHip, LeftKnee, LEG_COLOR),
        (RightHip, RightKnee, LEG_COLOR),
        (LeftKnee, LeftAnkle, LEG_COLOR),
        (RightKnee, RightAnkle, LEG_COLOR),
        (Nose, LeftShoulder, NECK_COLOR),
        (Nose, RightShoulder, NECK_COLOR),
    ]
};

/// Draw one detected person's skeleton and keypoint dots onto an RGB buffer.
///
/// Keypoints under `kp_threshold` confidence are skipped, as is any bone with
/// an uncertain endpoint.
pub fn draw_skeleton(
    buf: &mut [u8],
    width: usize,
    height: usize,
    detection: &PoseDetection,
    kp_threshold: f32,
) {
    for (from, to, color) in SKELETON {
        let a = detection.keypoint(from);
        let b = detection.keypoint(to);
        if a.confidence < kp_threshold || b.confidence < kp_threshold {
            continue;
        }
        draw_line(
            buf,
            width,
            height,
            a.position.x as i32,
            a.position.y as i32,
            b.position.x as i32,
            b.position.y as i32,
            color,
        );
    }

    for kp in &detection.keypoints {
        if kp.confidence >= kp_threshold {
            draw_filled_circle(
                buf,
                width,
                height,
                kp.position.x as i32,
                kp.position.y as i32,
                3,
                DOT_COLOR,
            );
        }
    }
}

/// Bresenham line, clipped to the buffer.
#[allow(clippy::too_many_arguments)]
pub fn draw_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: [u8; 3],
) {
    let Some(((mut x0, mut y0), (x1, y1))) = clip_line(x0, y0, x1, y1, width, height) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        set_pixel(buf, width, x0 as usize, y0 as usize, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Clip a segment to `[0, width-1] x [0, height-1]` with the Liang-Barsky
/// parametric test. `None` means the segment lies entirely outside.
fn clip_line(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    width: usize,
    height: usize,
) -> Option<((i32, i32), (i32, i32))> {
    let (fx0, fy0) = (x0 as f32, y0 as f32);
    let dx = (x1 - x0) as f32;
    let dy = (y1 - y0) as f32;
    let x_max = (width - 1) as f32;
    let y_max = (height - 1) as f32;

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    // One (p, q) pair per clip edge: left, right, top, bottom.
    for (p, q) in [
        (-dx, fx0),
        (dx, x_max - fx0),
        (-dy, fy0),
        (dy, y_max - fy0),
    ] {
        if p == 0.0 {
            // Parallel to this edge; reject if fully outside it.
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }

    let clipped = |t: f32| {
        (
            (fx0 + t * dx).round() as i32,
            (fy0 + t * dy).round() as i32,
        )
    };
    Some((clipped(t0), clipped(t1)))
}

/// Filled circle, drawn as horizontal spans and clipped to the buffer.
pub fn draw_filled_circle(
    buf: &mut [u8],
    width: usize,
    height: usize,
    cx: i32,
    cy: i32,
    radius: i32,
    color: [u8; 3],
) {
    for dy in -radius..=radius {
        let y = cy + dy;
        if y < 0 || y >= height as i32 {
            continue;
        }
        let half_span = (((radius * radius - dy * dy) as f32).sqrt()) as i32;
        let x_start = (cx - half_span).max(0);
        let x_end = (cx + half_span).min(width as i32 - 1);
        for x in x_start..=x_end {
            set_pixel(buf, width, x as usize, y as usize, color);
        }
    }
}

/// Pack an HWC RGB buffer into the 0x00RRGGBB words minifb expects.
pub fn rgb_to_argb(buf: &[u8], width: usize, height: usize) -> Vec<u32> {
    debug_assert_eq!(buf.len(), width * height * 3);

    buf.chunks_exact(3)
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect()
}

fn set_pixel(buf: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let idx = (y * width + x) * 3;
    buf[idx..idx + 3].copy_from_slice(&color);
}
