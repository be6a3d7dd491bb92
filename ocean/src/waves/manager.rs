use bevy::math::{Vec2, Vec3};
use bevy::prelude::Resource;
use log::debug;

use super::form::{WaveField, WaveForm, WaveSample};

/// Handle to a wave form owned by a [`WaveManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaveFormId(u64);

/// Owns the active wave forms and composes them into a single surface.
///
/// Contributions are summed in insertion order. Floating-point addition is
/// not associative, so two managers holding the same forms in a different
/// order may differ in the last bits; everything that samples one manager
/// sees a single consistent order.
#[derive(Debug, Default, Resource)]
pub struct WaveManager {
    forms: Vec<(WaveFormId, Box<dyn WaveForm>)>,
    next_id: u64,
}

impl WaveManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_forms(forms: impl IntoIterator<Item = Box<dyn WaveForm>>) -> Self {
        let mut manager = Self::new();
        for form in forms {
            manager.add_boxed(form);
        }
        manager
    }

    /// Take ownership of a wave form and start including it in samples.
    pub fn add_wave_form(&mut self, form: impl WaveForm + 'static) -> WaveFormId {
        self.add_boxed(Box::new(form))
    }

    pub fn add_boxed(&mut self, form: Box<dyn WaveForm>) -> WaveFormId {
        let id = WaveFormId(self.next_id);
        self.next_id += 1;
        debug!("Adding wave form {:?}: {:?}", id, form);
        self.forms.push((id, form));
        id
    }

    /// Drop the wave form with this id. Unknown ids are ignored.
    ///
    /// Returns whether a form was removed.
    pub fn remove_wave_form(&mut self, id: WaveFormId) -> bool {
        let Some(index) = self.forms.iter().position(|(form_id, _)| *form_id == id) else {
            return false;
        };
        // `remove` keeps the summation order of the remaining forms
        let (_, form) = self.forms.remove(index);
        debug!("Removed wave form {:?}: {:?}", id, form);
        true
    }

    pub fn contains(&self, id: WaveFormId) -> bool {
        self.forms.iter().any(|(form_id, _)| *form_id == id)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn clear(&mut self) {
        self.forms.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = WaveFormId> + '_ {
        self.forms.iter().map(|(id, _)| *id)
    }

    /// Combined displacement and corrected normal at `position`.
    ///
    /// The normal is `(-Σx, -Σy, 1 - Σz)` over the raw contributions: a
    /// linear approximation that points roughly up for gentle waves. It is
    /// not normalized.
    pub fn sample(&self, position: Vec2, time: f32) -> WaveSample {
        let mut displacement = Vec3::ZERO;
        let mut normal = Vec3::ZERO;

        for (_, form) in &self.forms {
            let contribution = form.sample(position, time);
            displacement += contribution.displacement;
            normal += contribution.normal;
        }

        WaveSample {
            displacement,
            normal: Vec3::new(-normal.x, -normal.y, 1.0 - normal.z),
        }
    }
}

impl WaveField for WaveManager {
    fn sample(&self, position: Vec2, time: f32) -> WaveSample {
        WaveManager::sample(self, position, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::{GerstnerParams, GerstnerWaveForm};

    fn three_forms() -> Vec<GerstnerWaveForm> {
        vec![
            GerstnerWaveForm::new(GerstnerParams::new(750.0, 1.0, 60.0, 1.0)),
            GerstnerWaveForm::new(
                GerstnerParams::new(420.0, 0.6, 25.0, 1.4).with_direction(Vec2::new(0.3, 1.0)),
            ),
            GerstnerWaveForm::new(
                GerstnerParams::new(180.0, 0.4, 8.0, 2.1)
                    .with_direction(Vec2::new(-1.0, 0.5))
                    .with_phase(0.7),
            ),
        ]
    }

    #[test]
    fn test_empty_manager_is_calm() {
        let manager = WaveManager::new();
        assert_eq!(manager.sample(Vec2::new(5.0, -2.0), 4.0), WaveSample::CALM);
    }

    #[test]
    fn test_composition_is_additive() {
        let forms = three_forms();
        let mut manager = WaveManager::new();
        for form in forms.iter().cloned() {
            manager.add_wave_form(form);
        }

        for &(x, y, t) in &[(0.0, 0.0, 0.0), (310.0, -75.0, 2.5), (-1200.0, 640.0, 41.0)] {
            let position = Vec2::new(x, y);
            let mut displacement = Vec3::ZERO;
            let mut normal = Vec3::ZERO;
            for form in &forms {
                let s = form.sample(position, t);
                displacement += s.displacement;
                normal += s.normal;
            }

            let sample = manager.sample(position, t);
            assert_eq!(sample.displacement, displacement);
            assert_eq!(
                sample.normal,
                Vec3::new(-normal.x, -normal.y, 1.0 - normal.z)
            );
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut manager = WaveManager::new();
        let first = manager.add_wave_form(GerstnerWaveForm::default());
        let second = manager.add_wave_form(GerstnerWaveForm::default());
        assert_eq!(manager.len(), 2);

        assert!(manager.remove_wave_form(first));
        assert!(!manager.remove_wave_form(first));
        assert!(!manager.contains(first));
        assert!(manager.contains(second));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_ids_are_unique_after_removal() {
        let mut manager = WaveManager::new();
        let first = manager.add_wave_form(GerstnerWaveForm::default());
        manager.remove_wave_form(first);
        let second = manager.add_wave_form(GerstnerWaveForm::default());
        assert_ne!(first, second);
        assert_eq!(manager.ids().collect::<Vec<_>>(), vec![second]);
    }

    #[test]
    fn test_removing_everything_returns_to_calm() {
        let mut manager = WaveManager::from_forms(
            three_forms()
                .into_iter()
                .map(|form| Box::new(form) as Box<dyn WaveForm>),
        );
        let ids: Vec<_> = manager.ids().collect();
        for id in ids {
            manager.remove_wave_form(id);
        }
        assert!(manager.is_empty());
        assert_eq!(manager.sample(Vec2::new(1.0, 1.0), 1.0), WaveSample::CALM);
    }

    #[test]
    fn test_clear_drops_all_forms_but_keeps_ids_fresh() {
        let mut manager = WaveManager::new();
        let before = manager.add_wave_form(GerstnerWaveForm::default());
        manager.add_wave_form(GerstnerWaveForm::default());

        manager.clear();

        assert!(manager.is_empty());
        assert!(!manager.contains(before));
        assert_eq!(manager.sample(Vec2::new(5.0, -2.0), 3.0), WaveSample::CALM);
        let after = manager.add_wave_form(GerstnerWaveForm::default());
        assert_ne!(after, before);
    }
}
