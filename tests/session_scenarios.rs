//! End-to-end editing sessions through the public API: phrases in, snapshots
//! and notices out.

use image::{Rgb, RgbImage};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vox_edit::command::{Command, CommandEvent};
use vox_edit::editor::{CropSession, Editor, Mode, Outcome};
use vox_edit::imaging::{CropRect, RustBackend, load_snapshot, save_snapshot};
use vox_edit::phrases;
use vox_edit::session::{NotificationSink, RenderSink, Session, command_queue};

#[derive(Clone, Default)]
struct Recorder {
    frames: Arc<Mutex<Vec<(String, RgbImage)>>>,
    notices: Arc<Mutex<Vec<String>>>,
}

impl RenderSink for Recorder {
    fn render(&mut self, image: &RgbImage, description: &str) {
        self.frames
            .lock()
            .unwrap()
            .push((description.to_string(), image.clone()));
    }
}

impl NotificationSink for Recorder {
    fn notify(&mut self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Image whose pixel at (x, y) is (x, y, x + y), so sub-regions are easy to check.
fn coordinate_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, (x + y) as u8]))
}

fn parse_all(lines: &[&str]) -> Vec<CommandEvent> {
    lines
        .iter()
        .map(|line| CommandEvent::new(phrases::parse(line).unwrap(), *line))
        .collect()
}

#[test]
fn brightness_then_undo_twice() {
    let mut editor = Editor::new(RgbImage::new(4, 4));

    assert_eq!(
        editor.apply(&Command::SetBrightness { delta: 50 }),
        Outcome::Changed
    );
    assert!(editor.current().pixels().all(|p| *p == Rgb([50, 50, 50])));

    assert_eq!(editor.apply(&Command::Undo), Outcome::Changed);
    assert!(editor.current().pixels().all(|p| *p == Rgb([0, 0, 0])));

    assert_eq!(editor.apply(&Command::Undo), Outcome::NothingToUndo);
    assert_eq!(editor.history().len(), 1);
    assert!(editor.current().pixels().all(|p| *p == Rgb([0, 0, 0])));
}

#[test]
fn default_crop_on_eight_by_eight() {
    let base = coordinate_image(8, 8);
    let mut editor = Editor::new(base.clone());
    let before = editor.history().len();

    editor.apply(&Command::InitCrop);
    assert_eq!(
        editor.mode(),
        Mode::Cropping(CropSession {
            rect: CropRect::new(2, 2, 4, 4)
        })
    );

    editor.apply(&Command::ConfirmCrop);
    assert_eq!(editor.mode(), Mode::Idle);
    assert_eq!(editor.history().len(), before + 1);

    let cropped = editor.current();
    assert_eq!(cropped.dimensions(), (4, 4));
    for (x, y, pixel) in cropped.enumerate_pixels() {
        assert_eq!(pixel, base.get_pixel(x + 2, y + 2));
    }
}

#[test]
fn spoken_crop_session_through_queue() {
    let base = coordinate_image(20, 10);
    let recorder = Recorder::default();
    let mut session = Session::new(Editor::new(base.clone()), recorder.clone(), recorder.clone());
    let (tx, rx) = command_queue(2);

    let script = parse_all(&[
        "Init Crop",
        "set crop position to 5 and 1",
        "Change Crop Width To 30 And Height To 3",
        "Invert Image",
        "Crop Image",
    ]);
    let producer = std::thread::spawn(move || {
        for event in script {
            tx.submit(event).unwrap();
        }
    });
    let stats = session.run(rx);
    producer.join().unwrap();

    // Invert arrives mid-crop and is dropped
    assert_eq!(stats.applied, 4);
    assert_eq!(stats.ignored, 1);

    let editor = session.into_editor();
    // Width is fitted to the 15 columns left of x = 5
    assert_eq!(editor.current().dimensions(), (15, 3));
    assert_eq!(editor.current().get_pixel(0, 0), base.get_pixel(5, 1));
    // Base plus the crop; no preview left behind
    assert_eq!(editor.history().len(), 2);

    let frames = recorder.frames.lock().unwrap();
    let texts: Vec<&str> = frames.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Init Crop",
            "set crop position to 5 and 1",
            "Change Crop Width To 30 And Height To 3",
            "Crop Image",
        ]
    );
}

#[test]
fn undo_during_crop_returns_to_pre_crop_image() {
    let base = coordinate_image(6, 6);
    let mut editor = Editor::new(base);
    editor.apply(&Command::Grayscale);
    let before = editor.current().clone();

    editor.apply(&Command::InitCrop);
    editor.apply(&Command::SetCropSize {
        width: 2,
        height: 2,
    });
    assert_eq!(editor.history().len(), 3);

    assert_eq!(editor.apply(&Command::Undo), Outcome::Changed);
    assert_eq!(editor.mode(), Mode::Idle);
    assert_eq!(editor.current(), &before);
}

#[test]
fn every_edit_is_undone_exactly() {
    let base = coordinate_image(5, 3);
    let edits = [
        Command::SetBrightness { delta: -30 },
        Command::SetContrast { delta: 40.0 },
        Command::Grayscale,
        Command::Invert,
        Command::ColorFilter {
            color: Rgb([255, 128, 0]),
        },
        Command::Flip,
        Command::Rotate,
    ];
    let mut editor = Editor::new(base);
    for edit in edits {
        let before = editor.current().clone();
        let len = editor.history().len();
        editor.apply(&edit);
        assert_eq!(editor.history().len(), len + 1, "{edit}");
        editor.apply(&Command::Undo);
        assert_eq!(editor.current(), &before, "{edit}");
    }
}

#[test]
fn nothing_to_undo_is_a_notice() {
    let recorder = Recorder::default();
    let mut session = Session::new(
        Editor::new(RgbImage::new(1, 1)),
        recorder.clone(),
        recorder.clone(),
    );
    session.dispatch(&Command::Undo.into());
    assert!(recorder.frames.lock().unwrap().is_empty());
    assert_eq!(
        *recorder.notices.lock().unwrap(),
        vec!["There are no more undo actions.".to_string()]
    );
}

#[test]
fn edited_image_survives_save_and_load() {
    let tmp = TempDir::new().unwrap();
    let backend = RustBackend::new();
    let source = tmp.path().join("in.png");
    save_snapshot(&backend, &coordinate_image(12, 7), &source).unwrap();

    let mut editor = Editor::new(load_snapshot(&backend, &source).unwrap());
    for event in parse_all(&["Rotate Image", "Invert Image"]) {
        editor.apply(&event.command);
    }
    let output = tmp.path().join("out").join("edited.png");
    save_snapshot(&backend, editor.current(), &output).unwrap();

    let reloaded = load_snapshot(&backend, &output).unwrap();
    assert_eq!(reloaded.dimensions(), (7, 12));
    assert_eq!(&reloaded, editor.current());
}
