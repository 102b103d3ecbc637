//! Built-in generic symbols.
//!
//! Only body extents and pins are carried; drawing primitives belong to the
//! renderer.

use super::{Pin, PinDirection, SymbolDef};
use super::PinDirection::{Down, Left, Right, Up};

fn sym(id: &str, bbox: (f64, f64, f64, f64), pins: &[(&str, f64, f64, PinDirection)]) -> SymbolDef {
    let (x, y, w, h) = bbox;
    pins.iter().fold(SymbolDef::new(id).with_bbox(x, y, w, h), |s, &(name, px, py, dir)| {
        s.with_pin(Pin::new(name, px, py, dir))
    })
}

const TWO_TERMINAL_H: &[(&str, f64, f64, PinDirection)] = &[("1", -30.0, 0.0, Left), ("2", 30.0, 0.0, Right)];
const TWO_TERMINAL_V: &[(&str, f64, f64, PinDirection)] = &[("1", 0.0, -30.0, Up), ("2", 0.0, 30.0, Down)];
const DIODE: &[(&str, f64, f64, PinDirection)] = &[("A", 0.0, -30.0, Up), ("K", 0.0, 30.0, Down)];
const BJT: &[(&str, f64, f64, PinDirection)] = &[("B", -20.0, 0.0, Left), ("C", 10.0, -30.0, Up), ("E", 10.0, 30.0, Down)];
const FET: &[(&str, f64, f64, PinDirection)] = &[("G", -25.0, 0.0, Left), ("D", 10.0, -30.0, Up), ("S", 10.0, 30.0, Down)];
const AMPLIFIER: &[(&str, f64, f64, PinDirection)] = &[
    ("IN+", -30.0, -15.0, Left),
    ("IN-", -30.0, 15.0, Left),
    ("OUT", 30.0, 0.0, Right),
    ("VCC", 0.0, -25.0, Up),
    ("GND", 0.0, 25.0, Down),
];
const REGULATOR: &[(&str, f64, f64, PinDirection)] = &[("VIN", -30.0, 0.0, Left), ("VOUT", 30.0, 0.0, Right), ("GND", 0.0, 30.0, Down)];

/// Every built-in symbol, in catalog order.
pub fn builtin_symbols() -> Vec<SymbolDef> {
    vec![
        // passives
        sym("resistor", (-20.0, -6.0, 40.0, 12.0), TWO_TERMINAL_H),
        sym("R", (-20.0, -6.0, 40.0, 12.0), TWO_TERMINAL_H),
        sym("capacitor", (-20.0, -15.0, 40.0, 30.0), TWO_TERMINAL_V),
        sym("inductor", (-40.0, -10.0, 80.0, 20.0), &[("1", -40.0, 0.0, Left), ("2", 40.0, 0.0, Right)]),
        // diodes
        sym("diode", (-20.0, -20.0, 40.0, 40.0), DIODE),
        sym("zener_diode", (-20.0, -20.0, 40.0, 40.0), DIODE),
        sym("led", (-20.0, -20.0, 40.0, 40.0), DIODE),
        // transistors
        sym("transistor_npn", (-20.0, -30.0, 40.0, 60.0), BJT),
        sym("transistor_pnp", (-20.0, -30.0, 40.0, 60.0), BJT),
        sym("mosfet_n", (-25.0, -30.0, 45.0, 60.0), FET),
        sym("mosfet_p", (-25.0, -30.0, 45.0, 60.0), FET),
        // analog
        sym("opamp", (-30.0, -25.0, 60.0, 50.0), AMPLIFIER),
        sym("comparator", (-30.0, -25.0, 60.0, 50.0), AMPLIFIER),
        sym("buffer", (-25.0, -20.0, 50.0, 40.0), &[("IN", -25.0, 0.0, Left), ("OUT", 25.0, 0.0, Right)]),
        sym(
            "reference_voltage",
            (-25.0, -30.0, 50.0, 60.0),
            &[("VIN", 0.0, -30.0, Up), ("VOUT", 25.0, 0.0, Right), ("GND", 0.0, 30.0, Down)],
        ),
        // power conversion
        sym("voltage_regulator", (-30.0, -30.0, 60.0, 60.0), REGULATOR),
        sym("linear_regulator", (-30.0, -30.0, 60.0, 60.0), REGULATOR),
        sym(
            "switching_regulator",
            (-30.0, -30.0, 60.0, 60.0),
            &[("VIN", -30.0, 0.0, Left), ("VOUT", 30.0, 0.0, Right), ("GND", 0.0, 30.0, Down), ("SW", 0.0, -30.0, Up)],
        ),
        // ICs
        sym(
            "NE555",
            (-35.0, -40.0, 70.0, 80.0),
            &[
                ("GND", 0.0, 40.0, Down),
                ("TRIG", -35.0, 20.0, Left),
                ("OUT", 35.0, 0.0, Right),
                ("RESET", 0.0, -40.0, Up),
                ("CTRL", -35.0, -20.0, Left),
                ("THRES", -35.0, 0.0, Left),
                ("DISCH", 35.0, -20.0, Right),
                ("VCC", 35.0, 20.0, Right),
            ],
        ),
        sym(
            "MCU",
            (-40.0, -50.0, 80.0, 100.0),
            &[
                ("VCC", 0.0, -50.0, Up),
                ("GND", 0.0, 50.0, Down),
                ("PA0", -40.0, -30.0, Left),
                ("PA1", -40.0, -10.0, Left),
                ("PA2", -40.0, 10.0, Left),
                ("PA3", -40.0, 30.0, Left),
                ("PB0", 40.0, -30.0, Right),
                ("PB1", 40.0, -10.0, Right),
                ("PB2", 40.0, 10.0, Right),
                ("PB3", 40.0, 30.0, Right),
            ],
        ),
        // connectors
        sym(
            "usb_c",
            (-30.0, -50.0, 60.0, 100.0),
            &[
                ("VBUS", 30.0, -40.0, Right),
                ("GND", 30.0, 40.0, Right),
                ("D+", 30.0, -10.0, Right),
                ("D-", 30.0, 10.0, Right),
                ("CC1", 30.0, -25.0, Right),
                ("CC2", 30.0, 25.0, Right),
            ],
        ),
        sym("pin_header_1", (-10.0, -10.0, 20.0, 20.0), &[("1", 0.0, 0.0, Left)]),
        sym(
            "pin_header_n",
            (-15.0, -40.0, 30.0, 80.0),
            &[
                ("1", -15.0, -25.0, Left),
                ("2", -15.0, -10.0, Left),
                ("3", -15.0, 5.0, Left),
                ("4", -15.0, 20.0, Left),
                ("n", -15.0, 35.0, Left),
            ],
        ),
        // power symbols and labels
        sym("GND", (-10.0, -15.0, 20.0, 25.0), &[("GND", 0.0, -15.0, Up)]),
        sym("VCC", (-10.0, -25.0, 20.0, 25.0), &[("VCC", 0.0, 15.0, Down)]),
        sym("VDD", (-10.0, -25.0, 20.0, 25.0), &[("VDD", 0.0, 15.0, Down)]),
        sym("Tag", (-15.0, -15.0, 30.0, 30.0), &[("TAG", 0.0, 0.0, Left)]),
    ]
}
