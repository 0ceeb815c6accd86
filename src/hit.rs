use crate::{
    ray::Ray,
    scene::{Scene, Sphere},
};

/// Closest intersection found along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPayload {
    pub distance: f32,
    pub sphere_index: usize,
}

/// Candidate hit distance of `ray` against a single sphere.
///
/// Solves `a*t^2 + b*t + c = 0` in the sphere's local frame and returns the
/// far root `(-b + sqrt(discriminant)) / 2a`. Behind-camera (negative) roots
/// are not rejected.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    // (bx^2 + by^2 + bz^2)t^2 + (2(axbx + ayby + azbz))t + (ax^2 + ay^2 + az^2 - r^2) = 0
    // where
    // a = ray origin
    // b = ray direction
    // r = radius
    // t = hit distance
    let origin = ray.origin - sphere.position;

    let a = ray.direction.dot(ray.direction);
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * origin.dot(ray.direction);
    let c = origin.dot(origin) - sphere.radius * sphere.radius;

    // Quadratic formula discriminant
    // b^2  - 4ac
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    // (-b +- sqrt(discriminant)) / 2a
    // The near root (-b - sqrt) is the front face entry point.
    let closest_t = (-b + discriminant.sqrt()) / (2.0 * a);
    Some(closest_t)
}

/// Find the sphere whose candidate distance is smallest.
///
/// Comparison is strict, so on an exact tie the sphere earlier in the scene wins.
pub fn find_closest_hit(ray: &Ray, scene: &Scene) -> Option<HitPayload> {
    let mut closest: Option<HitPayload> = None;
    let mut hit_distance = f32::MAX;

    for (index, sphere) in scene.spheres.iter().enumerate() {
        let Some(t) = intersect_sphere(ray, sphere) else {
            continue;
        };

        if t < hit_distance {
            hit_distance = t;
            closest = Some(HitPayload {
                distance: t,
                sphere_index: index,
            });
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::default()
    }

    #[test]
    fn miss_returns_none() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(intersect_sphere(&ray, &unit_sphere()), None);
    }

    #[test]
    fn far_root_is_the_candidate() {
        // Roots at t = 2 (entry) and t = 4 (exit).
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(intersect_sphere(&ray, &unit_sphere()), Some(4.0));
    }

    #[test]
    fn negative_root_is_kept() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(intersect_sphere(&ray, &unit_sphere()), Some(-2.0));
    }

    #[test]
    fn unnormalized_direction_scales_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(intersect_sphere(&ray, &unit_sphere()), Some(2.0));
    }

    #[test]
    fn zero_direction_never_hits() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.5), Vec3::ZERO);
        assert_eq!(intersect_sphere(&ray, &unit_sphere()), None);

        let scene = Scene::new(vec![unit_sphere()]);
        assert_eq!(find_closest_hit(&ray, &scene), None);
    }

    #[test]
    fn zero_radius_grazes_only_through_center() {
        let point = Sphere::new(Vec3::ZERO, 0.0, Vec3::ONE);
        let through = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let beside = Ray::new(Vec3::new(0.0, 0.1, 3.0), Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(intersect_sphere(&through, &point), Some(3.0));
        assert_eq!(intersect_sphere(&beside, &point), None);
    }

    #[test]
    fn negative_radius_matches_positive() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let inverted = Sphere::new(Vec3::ZERO, -1.0, Vec3::ONE);

        assert_eq!(intersect_sphere(&ray, &inverted), Some(4.0));
        assert_eq!(
            intersect_sphere(&ray, &inverted),
            intersect_sphere(&ray, &unit_sphere())
        );
    }

    #[test]
    fn empty_scene_has_no_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(find_closest_hit(&ray, &Scene::default()), None);
    }

    #[test]
    fn smaller_candidate_wins() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        // Far roots: back sphere at t = 6, front sphere at t = 4.
        let scene = Scene::new(vec![
            Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0, Vec3::X),
            Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0, Vec3::Y),
        ]);

        let hit = find_closest_hit(&ray, &scene).unwrap();
        assert_eq!(hit.sphere_index, 1);
        assert_eq!(hit.distance, 4.0);
    }

    #[test]
    fn exact_tie_keeps_first_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let scene = Scene::new(vec![
            Sphere::new(Vec3::ZERO, 1.0, Vec3::X),
            Sphere::new(Vec3::ZERO, 1.0, Vec3::Y),
        ]);

        let hit = find_closest_hit(&ray, &scene).unwrap();
        assert_eq!(hit.sphere_index, 0);
    }

    #[test]
    fn sphere_behind_camera_can_win() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        // In front (z = -5): far root t = 6. Behind (z = 5): far root t = -4.
        let scene = Scene::new(vec![
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Vec3::X),
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Vec3::Y),
        ]);

        let hit = find_closest_hit(&ray, &scene).unwrap();
        assert_eq!(hit.sphere_index, 1);
        assert_eq!(hit.distance, -4.0);
    }
}
