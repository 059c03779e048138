#[cfg(test)]
mod tests {
    use crate::commands::SimCommand;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::math::{Vec2, Vec3};
    use crate::state::SimSnapshot;
    use crate::types::{BodyId, MovingBody, SimTime};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, -3.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, 7.0, -3.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vec3::new(4.0, -10.0, 18.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, -2.5, 3.0));
        assert_eq!(a.dot(b), 4.0 - 10.0 + 18.0);
    }

    #[test]
    fn test_vec3_cross_is_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_vec3_normalize_returns_prior_length() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        let len = v.normalize();
        assert!(approx(len, 5.0));
        assert!(approx(v.magnitude(), 1.0));
        assert!(approx(v.x, 0.6));
        assert!(approx(v.z, 0.8));
    }

    #[test]
    fn test_vec3_normalize_zero_stays_zero() {
        let mut v = Vec3::ZERO;
        assert_eq!(v.normalize(), 0.0);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_vec3_rotations() {
        let quarter = std::f32::consts::FRAC_PI_2;

        let mut v = Vec3::Y;
        v.rotate_x(quarter);
        assert!(approx(v.y, 0.0) && approx(v.z, 1.0));

        let mut v = Vec3::X;
        v.rotate_y(quarter);
        assert!(approx(v.x, 0.0) && approx(v.z, 1.0));

        let mut v = Vec3::X;
        v.rotate_z(quarter);
        assert!(approx(v.x, 0.0) && approx(v.y, 1.0));
    }

    #[test]
    fn test_vec3_horizontal_and_glam_conversion() {
        let v = Vec3::new(1.0, 7.0, -2.0);
        assert_eq!(v.horizontal(), Vec3::new(1.0, 0.0, -2.0));
        let g: glam::Vec3 = v.into();
        assert_eq!(Vec3::from(g), v);
    }

    #[test]
    fn test_vec2_perpendicular_and_rotate() {
        let v = Vec2::new(1.0, 0.0);
        assert_eq!(v.perpendicular(), Vec2::new(0.0, 1.0));
        assert_eq!(v.dot(v.perpendicular()), 0.0);

        let mut r = Vec2::new(0.0, 2.0);
        r.rotate(std::f32::consts::PI);
        assert!(approx(r.x, 0.0) && approx(r.y, -2.0));

        let mut n = Vec2::new(0.0, -4.0);
        assert!(approx(n.normalize(), 4.0));
        assert!(approx(n.y, -1.0));
        assert_eq!(Vec2::from(Vec3::new(1.0, 2.0, 3.0)), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_moving_body_prediction() {
        let body = MovingBody {
            id: BodyId(7),
            position: Vec3::new(0.0, 10.0, 0.0),
            velocity: Vec3::new(2.0, 0.0, 0.0),
            acceleration: Vec3::new(0.0, -10.0, 0.0),
            extents: Vec3::splat(1.0),
            lifespan: 5.0,
        };
        let p = body.predicted_position(1.0);
        assert!(approx(p.x, 2.0));
        assert!(approx(p.y, 5.0));
        assert_eq!(body.bounds().half_extents(), Vec3::splat(0.5));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..10 {
            t.advance(0.5);
        }
        assert_eq!(t.tick, 10);
        assert!((t.elapsed_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_command_serde() {
        for cmd in [
            SimCommand::Start,
            SimCommand::Pause,
            SimCommand::Resume,
            SimCommand::Stop,
        ] {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: SimCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(cmd, back);
        }
        let json = serde_json::to_string(&SimCommand::Pause).unwrap();
        assert_eq!(json, r#"{"type":"Pause"}"#);
    }

    #[test]
    fn test_event_is_tagged() {
        let event = SimEvent::Collision {
            a: BodyId(1),
            b: BodyId(2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"Collision""#));
    }

    #[test]
    fn test_default_snapshot_is_idle_and_empty() {
        let snap = SimSnapshot::default();
        assert_eq!(snap.phase, SimPhase::Idle);
        assert!(snap.projectiles.is_empty());
        assert_eq!(snap.targets_hit, 0);
        let json = serde_json::to_string(&snap).unwrap();
        let back: SimSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, SimPhase::Idle);
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::Invalid("capacity must be at least 2".into());
        assert_eq!(err.to_string(), "invalid config: capacity must be at least 2");

        let parse = serde_json::from_str::<SimCommand>("not json").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(err.to_string().starts_with("parse error:"));
    }
}
