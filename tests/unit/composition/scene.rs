use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::error::PlotvidError;
use crate::render::target::FrameRGBA;
use crate::timing::mapping::LinearPlaybackDefinedSpeed;

#[derive(Debug, Default)]
struct Recorder {
    clears: usize,
    drawn: Vec<f64>,
}

impl RenderTarget for Recorder {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: 2,
            height: 2,
        }
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.drawn.clear();
    }

    fn render(&mut self) -> PlotvidResult<FrameRGBA> {
        Ok(FrameRGBA::solid(2, 2, [0, 0, 0, 255], true))
    }
}

fn speed_scene() -> Scene<Recorder> {
    let timing = Timing::new(LinearPlaybackDefinedSpeed::new(0.0, 100.0, 10.0).unwrap());
    Scene::new(timing, |ix, target: &mut Recorder, _| {
        target.drawn.push(ix);
        Ok(())
    })
}

#[test]
fn draw_clears_before_calling_back() {
    let mut scene = speed_scene();
    let mut target = Recorder::default();
    target.drawn.push(-1.0);

    scene.draw(42.0, &mut target).unwrap();
    assert_eq!(target.clears, 1);
    assert_eq!(target.drawn, vec![42.0]);
}

#[test]
fn draw_at_scenetime_updates_timing_first() {
    let mut scene = speed_scene().with_name("growth");
    let mut target = Recorder::default();

    let snap = scene.draw_at_scenetime(5.0, &mut target).unwrap();
    assert_eq!(snap.indextime, 50.0);
    assert!((snap.playback_rate - 10.0).abs() < 1e-9);
    assert_eq!(target.drawn, vec![50.0]);
    assert_eq!(scene.timing().current_stime(), 5.0);
    assert_eq!(scene.sduration(), 10.0);
    assert_eq!(scene.name(), "growth");
}

#[test]
fn callback_sees_current_timing_state() {
    let timing = Timing::new(LinearPlaybackDefinedSpeed::new(0.0, 100.0, 10.0).unwrap());
    let mut scene = Scene::new(timing, |ix, target: &mut Recorder, timing: &Timing| {
        assert_eq!(timing.current_indextime(), ix);
        target.drawn.push(timing.current_stime());
        Ok(())
    });
    let mut target = Recorder::default();
    scene.draw_at_scenetime(2.5, &mut target).unwrap();
    assert_eq!(target.drawn, vec![2.5]);
}

#[test]
fn callback_errors_propagate() {
    let timing = Timing::new(LinearPlaybackDefinedSpeed::new(0.0, 1.0, 1.0).unwrap());
    let mut scene = Scene::new(timing, |_, _: &mut Recorder, _| {
        Err(PlotvidError::render("no data"))
    });
    let err = scene.draw_at_scenetime(0.0, &mut Recorder::default()).unwrap_err();
    assert!(matches!(err, PlotvidError::Render(_)));
}
