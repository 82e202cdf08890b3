//! Drives the full transform pipeline without a renderer attached:
//! a focused camera, a cube model with two instances, and a few simulated
//! frames of keyboard/mouse deltas. The matrices printed at the end are
//! exactly the uniform payloads a renderer would upload each frame.
//!
//! Run with `RUST_LOG=debug cargo run --example walkthrough` to see the
//! focus/readiness log lines.

use std::sync::Arc;

use kinema::{Camera, Geometry, Light, Matrix4, Mesh, Model, Vector3, Vertex};

/// A unit cube with per-face normals, 24 vertices / 36 indices.
fn cube_geometry() -> Geometry {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // (normal, tangent u, tangent v) per face
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, u, v)) in faces.iter().enumerate() {
        let base = (face * 4) as u32;
        for (du, dv, uv) in [
            (-0.5, -0.5, [0.0, 0.0]),
            (0.5, -0.5, [1.0, 0.0]),
            (0.5, 0.5, [1.0, 1.0]),
            (-0.5, 0.5, [0.0, 1.0]),
        ] {
            let position = [
                normal[0] * 0.5 + u[0] * du + v[0] * dv,
                normal[1] * 0.5 + u[1] * du + v[1] * dv,
                normal[2] * 0.5 + u[2] * du + v[2] * dv,
            ];
            vertices.push(Vertex::new(position, *normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Geometry::new(vertices, indices).expect("cube indices are in range")
}

fn print_matrix(label: &str, m: &Matrix4) {
    let e = m.as_array();
    println!("{label}:");
    for row in 0..4 {
        println!(
            "  [{:8.4} {:8.4} {:8.4} {:8.4}]",
            e[row],
            e[row + 4],
            e[row + 8],
            e[row + 12]
        );
    }
}

fn main() {
    env_logger::init();

    // Viewer setup: 45 degree FOV over a 1280x720 canvas.
    let mut camera = Camera::new(45.0, 1280.0 / 720.0, 0.1, 100.0);
    camera.look_at(
        Vector3::new(0.0, 0.0, 5.0),
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(0.0, 1.0, 0.0),
    );

    let light = Light::new(Vector3::new(0.0, 0.0, -1.0));

    let mut cube = Model::new();
    cube.set_geometry(Arc::new(cube_geometry()))
        .expect("no layout present yet");
    cube.set_meshes(vec![Mesh::single(36)])
        .expect("layout fits the cube's index buffer");

    let left = cube.create_instance();
    let right = cube.create_instance();
    cube.instance_mut(left).rotate(-0.6);
    cube.instance_mut(left).move_by(1.5);
    cube.instance_mut(right).rotate(0.6);
    cube.instance_mut(right).move_by(1.5);

    // Sixty simulated frames: hold W, drag the mouse a little, and let the
    // cubes drift apart. Step sizes match a per-frame input handler.
    for frame in 0..60 {
        camera.move_by(0.1);
        camera.rotate(12.0 * 0.001, -30.0 * 0.001);

        cube.instance_mut(left).rotate(-0.01);
        cube.instance_mut(right).rotate(0.01);
        cube.instance_mut(right).move_by(0.01);

        if frame % 20 == 19 {
            let p = camera.position();
            let f = camera.forward();
            println!(
                "frame {:2}: camera at ({:6.3}, {:6.3}, {:6.3}) facing ({:6.3}, {:6.3}, {:6.3})",
                frame + 1,
                p.x,
                p.y,
                p.z,
                f.x,
                f.y,
                f.z
            );
        }
    }

    println!();
    println!("uniforms a renderer would upload for the final frame");
    println!("(light direction: {:?})", light.direction.to_array());
    println!();
    print_matrix("projectionMatrix", camera.projection_matrix());
    print_matrix("viewMatrix", camera.view_matrix());
    assert!(cube.is_ready());
    print_matrix("modelMatrix[left]", cube.instance(left).model_matrix());
    print_matrix("modelMatrix[right]", cube.instance(right).model_matrix());
}
