//! # Timeline Rendering
//!
//! Turns a generated [`Piece`] into a self-contained HTML timing chart: one
//! absolutely-positioned mark per sounding event on a seconds grid, a fixed
//! panel showing each player's instruments, and play/stop controls that
//! scroll the page in real time while flashing the panel as events pass.
//!
//! Rest events are part of the event log but draw nothing.

use crate::gesture::Event;
use crate::piece::Piece;

/// Horizontal pixels per second; chart rows are half an `EDGE` tall.
const EDGE: u64 = 50;

/// Span-mark fill colors, cycled by player id.
const PLAYER_COLORS: [&str; 12] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948",
    "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac", "#2f4b7c", "#a05195",
];

/// Render the piece as a complete HTML document.
pub fn render(piece: &Piece, title: &str) -> String {
    let mut html = String::new();
    push_header(&mut html, title);
    for event in piece.events() {
        push_event(&mut html, piece, event);
    }
    push_time_grid(&mut html, piece);
    push_players(&mut html, piece);
    push_controls(&mut html, piece);
    html
}

fn push_event(html: &mut String, piece: &Piece, event: &Event) {
    if event.is_rest {
        return;
    }

    // Instruments are folded into the piece before its events, so the label
    // is always present.
    let instrument_index = piece
        .instruments()
        .iter()
        .position(|i| i == &event.instrument)
        .unwrap_or(0);

    let top = (2 + event.player as u64) * (EDGE / 2);
    let left = event.start * EDGE as f64;
    let width = (event.stop - event.start) * EDGE as f64 - 1.0;
    let height = EDGE / 2 - 1;
    let color = PLAYER_COLORS[event.player % PLAYER_COLORS.len()];

    html.push_str(&format!(
        r#"<div class="span-mark"
     start-ms="{start_ms}"
     stop-ms="{stop_ms}"
     player="{player}"
     instrument="{instrument}"
     style="top: {top}px; left: {left}px; width: {width}px; height: {height}px; background-color: {color};">
     <p>{label}</p>
</div>
"#,
        start_ms = (event.start * 1000.0) as i64,
        stop_ms = (event.stop * 1000.0) as i64,
        player = event.player,
        instrument = instrument_index,
        top = top,
        left = left as i64,
        width = width as i64,
        height = height,
        color = color,
        label = escape_html(&event.instrument),
    ));
}

fn push_time_grid(html: &mut String, piece: &Piece) {
    // The grid runs a minute past the last event.
    let max_seconds = piece.length_seconds() + 60;
    let num_players = piece.num_players() as u64;
    let marker_height = (EDGE / 2) * (num_players + 2);

    for player in 1..=num_players {
        html.push_str(&format!(
            "<div class=\"cross-marker\" style=\"top: {}px; width: {}px; height: 1px;\"></div>\n",
            player * (EDGE / 2),
            max_seconds * EDGE,
        ));
    }

    for second in 0..max_seconds {
        html.push_str(&format!(
            "<div class=\"marker\" style=\"top: 0; left: {}px; width: 1px; height: {}px;\"></div>\n",
            second * EDGE,
            marker_height,
        ));
        html.push_str(&format!(
            "<div class=\"timestamp\" style=\"top: 0; left: {}px;\">{}:{:02}</div>\n",
            second * EDGE,
            second / 60,
            second % 60,
        ));
    }
}

fn push_players(html: &mut String, piece: &Piece) {
    html.push_str("<div class='players'>\n");
    for instrument in piece.instruments() {
        html.push_str(&format!(
            "<div class='instrument-label'>{}</div>\n",
            escape_html(instrument)
        ));
    }
    for player in 0..piece.num_players() {
        html.push_str(&format!("<div id='player-{}'>\n", player));
        for instrument in 0..piece.instruments().len() {
            html.push_str(&format!(
                "  <div class='instrument' id='{}'></div>\n",
                instrument
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn push_header(html: &mut String, title: &str) {
    html.push_str("<html>\n<head>\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(
        r#"<style>
div.span-mark {
  border: 1px black solid;
  position: absolute;
  opacity: 0.8;
  overflow: hidden;
  font-size: 8pt;
  line-height: 4px;
  cursor: pointer;
}
div.marker {
  position: absolute;
  background-color: black;
  z-index: -1;
}
div.cross-marker {
  position: absolute;
  background-color: #EEEEEE;
  z-index: -1;
}
div.timestamp {
  position: absolute;
  text-align: center;
  border: 1px solid black;
  padding: 2px;
}
div.players {
  position: fixed;
  bottom: 100px;
  left: 100px;
}
div.instrument {
  border: 1px black solid;
  width: 10px;
  height: 10px;
  float: left;
  background: white;
}
div.instrument-label {
  transform: rotate(-90deg);
  width: 10px;
  float: left;
  font-size: 8pt;
  border: 1px white solid;
}
div.controls {
  position: fixed;
  bottom: 50px;
}
#timeline-wrapper {
  position: relative;
}
html, body {
  margin: 0;
  padding: 0;
}
</style>
<script src="https://ajax.googleapis.com/ajax/libs/jquery/1.10.2/jquery.min.js"></script>
</head>
<body>
<div id="timeline-wrapper">
"#,
    );
}

fn push_controls(html: &mut String, piece: &Piece) {
    html.push_str(
        r##"</div>
<div class="controls">
<span id="top">&lt;&lt;</span> | <span id="play">Play</span> | <span id="stop">Stop</span>
</div>

<script>
$("#top").click(function() {
  $("body").scrollLeft(0);
});
$("#play").click(function() {
  var instrumentColors = [
    "red", "blue", "green", "yellow", "cyan", "orange", "brown", "black",
  ];
  var eventsInOrder = [];
  var spans = $(".span-mark");
  for (var i = 0; i < spans.length; i++) {
    var start = $(spans[i]).attr("start-ms");
    var stop = $(spans[i]).attr("stop-ms");

    var onInfo = {"player": $(spans[i]).attr("player"),
                  "instrument": Number($(spans[i]).attr("instrument")),
                  "action": "on"};
    var offInfo = {"player": $(spans[i]).attr("player"),
                   "instrument": Number($(spans[i]).attr("instrument")),
                   "action": "off"};

    eventsInOrder.push({"ts": start, "info": onInfo});
    eventsInOrder.push({"ts": Number(stop) - 20, "info": offInfo});
  }
  eventsInOrder.sort(function(a, b) { return a.ts - b.ts; });

  var currentPosition = $("body").scrollLeft();
"##,
    );
    html.push_str(&format!(
        "  var seconds = {};\n  var pixelsPerSecond = {};\n",
        piece.length_seconds(),
        EDGE,
    ));
    html.push_str(
        r##"  var eventIndex = 0;
  $("body").animate({scrollLeft: currentPosition + (pixelsPerSecond * seconds)},
    {
      duration: 1000 * seconds,
      easing: "linear",
      step: function(left) {
        var ts_ms = (left / pixelsPerSecond) * 1000;
        var newEventIndex = eventIndex;
        for (var i = eventIndex; i < eventsInOrder.length; i++) {
          if (eventsInOrder[i].ts < ts_ms) {
            var event = eventsInOrder[i];
            var color = "white";
            if (event.info.action === "on") {
              color = instrumentColors[event.info.instrument];
            }

            var player = $("#player-" + event.info.player);
            var instrument = player.children("#" + event.info.instrument);
            instrument.css("background", color);
            newEventIndex = i + 1;
          } else {
            break;
          }
        }

        eventIndex = newEventIndex;
      }
    });
});
$("#stop").click(function() {
  $("body").stop();
});
$(".span-mark").click(function() {
  var start_secs = parseInt($(this).attr("start-ms")) / 1000;
  var stop_secs = parseInt($(this).attr("stop-ms")) / 1000;
  var player = $(this).attr("player");
  alert("Start: " + start_secs + ", Stop: " + stop_secs + ", Player: " + player);
});
</script>

</body>
</html>
"##,
    );
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
