use skyfall_core::constants::{
    EXPLOSION_DURATION_SECS, EXPLOSION_FRAME_COUNT, EXPLOSION_FRAME_SIZE, EXPLOSION_SHEET_COLUMNS,
};
use skyfall_core::types::IntRect;

/// One-shot frame stepper over a sprite sheet laid out row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frame_width: i32,
    frame_height: i32,
    frame_count: u32,
    columns: u32,
    duration: f32,
    current_frame: u32,
    elapsed: f32,
}

impl Animation {
    pub fn new(frame_width: i32, frame_height: i32, frame_count: u32, columns: u32, duration: f32) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count,
            columns: columns.max(1),
            duration,
            current_frame: 0,
            elapsed: 0.0,
        }
    }

    /// The 16-frame, one second explosion sheet.
    pub fn explosion() -> Self {
        Self::new(
            EXPLOSION_FRAME_SIZE,
            EXPLOSION_FRAME_SIZE,
            EXPLOSION_FRAME_COUNT,
            EXPLOSION_SHEET_COLUMNS,
            EXPLOSION_DURATION_SECS,
        )
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn is_finished(&self) -> bool {
        self.current_frame >= self.frame_count
    }

    pub fn update(&mut self, dt: f32) {
        if self.frame_count == 0 {
            return;
        }
        let time_per_frame = self.duration / self.frame_count as f32;
        self.elapsed += dt;

        while self.elapsed >= time_per_frame && self.current_frame < self.frame_count {
            self.elapsed -= time_per_frame;
            self.current_frame += 1;
        }
    }

    /// Sheet rectangle of the current frame; the last frame once finished.
    pub fn texture_rect(&self) -> IntRect {
        let frame = self.current_frame.min(self.frame_count.saturating_sub(1));
        let column = (frame % self.columns) as i32;
        let row = (frame / self.columns) as i32;
        IntRect::new(
            column * self.frame_width,
            row * self.frame_height,
            self.frame_width,
            self.frame_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_finishes_after_duration() {
        let mut anim = Animation::explosion();
        for _ in 0..59 {
            anim.update(1.0 / 60.0);
        }
        assert!(!anim.is_finished(), "explosion should still play before one second");
        anim.update(2.0 / 60.0);
        assert!(anim.is_finished(), "explosion should finish after one second");
    }

    #[test]
    fn test_frame_rect_walks_sheet() {
        let mut anim = Animation::explosion();
        assert_eq!(anim.texture_rect(), IntRect::new(0, 0, 256, 256));
        // 5 frames at 1/16 s each
        anim.update(5.0 / 16.0 + 0.001);
        assert_eq!(anim.current_frame(), 5);
        assert_eq!(anim.texture_rect(), IntRect::new(256, 256, 256, 256));
    }

    #[test]
    fn test_finished_holds_last_frame() {
        let mut anim = Animation::explosion();
        anim.update(10.0);
        assert!(anim.is_finished());
        assert_eq!(anim.current_frame(), 16, "animation stops counting at frame count");
        assert_eq!(anim.texture_rect(), IntRect::new(768, 768, 256, 256));
    }

    #[test]
    fn test_custom_sheet_stops_at_end() {
        let mut anim = Animation::new(10, 10, 4, 2, 0.4);
        anim.update(0.25);
        assert_eq!(anim.current_frame(), 2);
        assert_eq!(anim.texture_rect(), IntRect::new(0, 10, 10, 10));
        anim.update(1.0);
        assert!(anim.is_finished());
        assert_eq!(anim.current_frame(), 4);
    }
}
