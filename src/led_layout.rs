//! A fully const module that tells the (col, row) location of each LED pixel.
//!
//! See [`LedLayout`] for the wiring patterns NeoMatrix-style panels use: progressive or
//! serpentine, by rows or by columns, starting from any corner, and panels tiled side by side.

/// A fully const struct that tells the (col, row) location of each LED pixel.
///
/// `map()[led_index]` is the (col, row) lit by that position on the strip. Every cell of the
/// `W`×`H` grid appears exactly once; [`LedLayout::new`] checks this at compile time when used
/// in a `const`.
///
/// ```
/// use ws_flow::LedLayout;
///
/// // A serpentine panel whose first LED is in the top-right corner.
/// const PANEL: LedLayout<6, 3, 2> = LedLayout::serpentine_row_major().flip_h();
/// const EXPECTED: LedLayout<6, 3, 2> =
///     LedLayout::new([(2, 0), (1, 0), (0, 0), (0, 1), (1, 1), (2, 1)]);
/// const _: () = assert!(PANEL.equals(&EXPECTED));
/// ```
///
/// ```text
/// serpentine_row_major 3×2:   after flip_h:
///   LED0  LED1  LED2            LED2  LED1  LED0
///   LED5  LED4  LED3            LED3  LED4  LED5
/// ```
///
/// Compile-time validation catches configuration errors:
///
/// ```compile_fail
/// # use ws_flow::LedLayout;
/// // Duplicate coordinate (0,0) - caught at compile time
/// const INVALID: LedLayout<3, 3, 1> = LedLayout::new([(0, 0), (0, 0), (2, 0)]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// LED index → (col, row).
    #[must_use]
    pub const fn map(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// Invert the layout: index `row * W + col` gives the LED index for that cell.
    #[must_use]
    pub const fn mapping_by_xy(&self) -> [u16; N] {
        assert!(
            N <= u16::MAX as usize,
            "total LEDs must fit in u16 for mapping_by_xy"
        );

        // `new` already proved the map is a bijection onto the grid.
        let mut mapping = [0_u16; N];
        let mut led_index = 0;
        while led_index < N {
            let (col, row) = self.map[led_index];
            mapping[row as usize * W + col as usize] = led_index as u16;
            led_index += 1;
        }
        mapping
    }

    /// Const equality helper for doctests and compile-time checks.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut i = 0;
        while i < N {
            if self.map[i].0 != other.map[i].0 || self.map[i].1 != other.map[i].1 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Constructor: verifies the mapping covers every cell of the `W`×`H` grid exactly once.
    #[must_use]
    pub const fn new(map: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut seen = [false; N];

        let mut i = 0;
        while i < N {
            let (c, r) = map[i];
            let c = c as usize;
            let r = r as usize;

            assert!(c < W, "column out of bounds");
            assert!(r < H, "row out of bounds");

            let cell = r * W + c;
            assert!(!seen[cell], "duplicate (col,row) in mapping");
            seen[cell] = true;

            i += 1;
        }

        let mut k = 0;
        while k < N {
            assert!(seen[k], "mapping does not cover every cell");
            k += 1;
        }

        Self { map }
    }

    /// Single-row strip, left to right.
    #[must_use]
    pub const fn linear_h() -> Self {
        assert!(H == 1, "linear_h requires H == 1");
        Self::row_major()
    }

    /// Single-column strip, top to bottom.
    #[must_use]
    pub const fn linear_v() -> Self {
        assert!(W == 1, "linear_v requires W == 1");
        Self::column_major()
    }

    /// Progressive rows: every row runs left to right, starting top-left.
    #[must_use]
    pub const fn row_major() -> Self {
        assert!(W * H == N, "W*H must equal N");

        let mut mapping = [(0_u16, 0_u16); N];
        let mut led_index = 0;
        while led_index < N {
            mapping[led_index] = ((led_index % W) as u16, (led_index / W) as u16);
            led_index += 1;
        }
        Self::new(mapping)
    }

    /// Progressive columns: every column runs top to bottom, starting top-left.
    #[must_use]
    pub const fn column_major() -> Self {
        assert!(W * H == N, "W*H must equal N");

        let mut mapping = [(0_u16, 0_u16); N];
        let mut led_index = 0;
        while led_index < N {
            mapping[led_index] = ((led_index / H) as u16, (led_index % H) as u16);
            led_index += 1;
        }
        Self::new(mapping)
    }

    /// Zigzag columns: even columns run down, odd columns run up, starting top-left.
    ///
    /// ```
    /// use ws_flow::LedLayout;
    ///
    /// const MAP: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major();
    /// assert_eq!(MAP.map(), &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]);
    /// ```
    #[must_use]
    pub const fn serpentine_column_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut mapping = [(0_u16, 0_u16); N];
        let mut row_index = 0;
        while row_index < H {
            let mut column_index = 0;
            while column_index < W {
                let led_index = if column_index % 2 == 0 {
                    // Even column: top-to-bottom
                    column_index * H + row_index
                } else {
                    // Odd column: bottom-to-top
                    column_index * H + (H - 1 - row_index)
                };
                mapping[led_index] = (column_index as u16, row_index as u16);
                column_index += 1;
            }
            row_index += 1;
        }
        Self::new(mapping)
    }

    /// Zigzag rows: even rows run right, odd rows run left, starting top-left.
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut mapping = [(0_u16, 0_u16); N];
        let mut row_index = 0;
        while row_index < H {
            let mut column_index = 0;
            while column_index < W {
                let led_index = if row_index % 2 == 0 {
                    row_index * W + column_index
                } else {
                    row_index * W + (W - 1 - column_index)
                };
                mapping[led_index] = (column_index as u16, row_index as u16);
                column_index += 1;
            }
            row_index += 1;
        }
        Self::new(mapping)
    }

    /// Rotate the panel a quarter turn clockwise; width and height swap.
    #[must_use]
    pub const fn rotate_cw(self) -> LedLayout<N, H, W> {
        let mut out = [(0u16, 0u16); N];
        let mut i = 0;
        while i < N {
            let (c, r) = self.map[i];
            let c = c as usize;
            let r = r as usize;
            out[i] = ((H - 1 - r) as u16, c as u16);
            i += 1;
        }
        LedLayout::<N, H, W>::new(out)
    }

    /// Mirror left to right.
    #[must_use]
    pub const fn flip_h(self) -> Self {
        let mut out = [(0u16, 0u16); N];
        let mut i = 0;
        while i < N {
            let (c, r) = self.map[i];
            out[i] = ((W - 1 - c as usize) as u16, r);
            i += 1;
        }
        Self::new(out)
    }

    /// Mirror top to bottom.
    #[must_use]
    pub const fn flip_v(self) -> Self {
        let mut out = [(0u16, 0u16); N];
        let mut i = 0;
        while i < N {
            let (c, r) = self.map[i];
            out[i] = (c, (H - 1 - r as usize) as u16);
            i += 1;
        }
        Self::new(out)
    }

    #[must_use]
    pub const fn rotate_180(self) -> Self {
        self.flip_h().flip_v()
    }

    #[must_use]
    pub const fn rotate_ccw(self) -> LedLayout<N, H, W> {
        self.rotate_cw().rotate_180()
    }

    /// Tile `right` after `self`: its LEDs follow on the strip and its columns sit to the right.
    ///
    /// ```
    /// use ws_flow::LedLayout;
    ///
    /// const PANEL: LedLayout<4, 2, 2> = LedLayout::serpentine_column_major();
    /// const TWO: LedLayout<8, 4, 2> = PANEL.concat_h::<4, 8, 2, 4>(PANEL);
    /// assert_eq!(TWO.map()[4], (2, 0));
    /// ```
    #[must_use]
    pub const fn concat_h<
        const N2: usize,
        const OUT_N: usize,
        const W2: usize,
        const OUT_W: usize,
    >(
        self,
        right: LedLayout<N2, W2, H>,
    ) -> LedLayout<OUT_N, OUT_W, H> {
        assert!(OUT_N == N + N2, "OUT_N must equal LEFT + RIGHT");
        assert!(OUT_W == W + W2, "OUT_W must equal W + W2");

        let mut out = [(0u16, 0u16); OUT_N];

        let mut i = 0;
        while i < N {
            out[i] = self.map[i];
            i += 1;
        }

        let mut j = 0;
        while j < N2 {
            let (c, r) = right.map[j];
            out[N + j] = ((c as usize + W) as u16, r);
            j += 1;
        }

        LedLayout::<OUT_N, OUT_W, H>::new(out)
    }
}
