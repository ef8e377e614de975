#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use splitgrid_layout::{
    NoopCursor, Orientation, Point, PointerEvent, PointerId, Rect, ResizeCounter, SplitterGrid,
};

#[derive(Debug, Arbitrary)]
enum Op {
    Down { pointer: u8, x: i16, y: i16 },
    Move { pointer: u8, x: i16, y: i16, dx: i8, dy: i8 },
    Up { pointer: u8 },
    Release { pointer: u8 },
    Children(u8),
    Columns(u8),
    Rows(u8),
    Margin(i8),
    Floors { column: i8, row: i8 },
    Orientation(u8),
    Resize { width: u16, height: u16 },
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let counter = ResizeCounter::new();
    let mut grid = SplitterGrid::new(NoopCursor).with_resize_counter(counter.clone());
    grid.set_columns(2);
    grid.set_child_count(4);
    grid.set_bounds(Rect::from_size(400.0, 300.0));

    // Cap the stream to keep fuzzing fast.
    for _ in 0..256 {
        let Ok(op) = Op::arbitrary(&mut u) else {
            break;
        };
        apply(&mut grid, op);

        // Post-conditions that must always hold:
        let shape = grid.shape();
        assert_eq!(grid.column_ratios().len(), shape.columns, "column ratios out of sync");
        assert_eq!(grid.row_ratios().len(), shape.rows, "row ratios out of sync");
        assert_eq!(counter.get(), grid.active_sessions(), "counter drifted");
        assert!(
            grid.column_ratios().as_slice().iter().all(|r| r.is_finite()),
            "non-finite column ratio"
        );
        assert!(
            grid.row_ratios().as_slice().iter().all(|r| r.is_finite()),
            "non-finite row ratio"
        );
        for length in [grid.margin(), grid.min_column_width(), grid.min_row_height()] {
            assert!(length.is_finite() && length >= 0.0, "invalid length {length}");
        }
        let layout = grid.layout();
        assert!(layout.len() <= grid.child_count(), "placed more cells than children");
    }
});

fn apply(grid: &mut SplitterGrid, op: Op) {
    match op {
        Op::Down { pointer, x, y } => {
            let event = PointerEvent::down(PointerId::new(pointer.into()), point(x, y));
            grid.handle_pointer(&event);
        }
        Op::Move { pointer, x, y, dx, dy } => {
            let event = PointerEvent::moved(
                PointerId::new(pointer.into()),
                point(x, y),
                f64::from(dx),
                f64::from(dy),
            );
            grid.handle_pointer(&event);
        }
        Op::Up { pointer } => {
            let event = PointerEvent::up(PointerId::new(pointer.into()), Point::new(0.0, 0.0));
            grid.handle_pointer(&event);
        }
        Op::Release { pointer } => {
            grid.release_pointer(PointerId::new(pointer.into()));
        }
        Op::Children(count) => {
            grid.set_child_count(usize::from(count % 64));
        }
        Op::Columns(count) => {
            grid.set_columns(usize::from(count % 9));
        }
        Op::Rows(count) => {
            grid.set_rows(usize::from(count % 9));
        }
        Op::Margin(margin) => {
            grid.set_margin(f64::from(margin % 40));
        }
        Op::Floors { column, row } => {
            grid.set_min_column_width(f64::from(column));
            grid.set_min_row_height(f64::from(row));
        }
        Op::Orientation(index) => {
            let all = Orientation::ALL;
            grid.set_orientation(all[usize::from(index) % all.len()]);
        }
        Op::Resize { width, height } => {
            grid.set_bounds(Rect::from_size(f64::from(width % 2048), f64::from(height % 2048)));
        }
    }
}

fn point(x: i16, y: i16) -> Point {
    Point::new(f64::from(x), f64::from(y))
}
