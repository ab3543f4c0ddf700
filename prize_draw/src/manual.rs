/*!

This is the long-form manual for `prize_draw` and `luckydraw`.

## Participant lists

The participant list is a spreadsheet with a header row. One of the columns
must be called `Name` (another column can be selected with `--name-column`).
Every non-empty cell of that column is one participant.

Supported formats:
* `csv` Comma Separated Values
* `excel` Excel workbooks (`.xlsx`). The first worksheet is used unless
  `--excel-worksheet-name` is given.

Names that appear more than once are kept: each line is one entry in the
draw and may win separately.

## Prize schedule

The prizes are drawn in a fixed order: all the main prizes first, then all
the bonus prizes. The schedule is read from a JSON file given with
`--config`:

```json
{
  "mainPrizes": [
    { "name": "五等獎", "count": 20, "translation": "Fifth Prize" },
    { "name": "一等獎", "count": 1, "translation": "First Prize" }
  ],
  "bonusPrizes": [
    { "name": "Tommy加彩5000", "count": 5, "translation": "Tommy Bonus 5000" }
  ],
  "presetWinners": [
    { "prize": "Tommy加彩5000", "position": 2, "name": "Johnson" }
  ]
}
```

The label of a prize is `name (translation)`, or just `name` when no
translation is given. This label is the one written in the winners list.

### Preset winners

A bonus prize can name one preset winner and the rank (starting at 1) at
which this winner is announced. Preset winners are taken out of the
participant list when it is loaded, so they cannot win any other prize.

When the bonus prize is drawn, `count` names are drawn from the remaining
participants and the preset winner is inserted at its rank. A bonus prize
with a count of 5 therefore announces 6 winners. If fewer names could be
drawn than the rank of the preset winner, the preset winner is announced
last.

## The session

A session goes through three pages:

1. **Setup**: load the participant list (`load <path>`) and review the main
   prizes, then `begin`.
2. **Drawing**: for every prize, `prepare` shows the prize and the number of
   winners, then `draw` announces the winners. When nobody is left to draw
   from, the draw is refused and nothing changes.
3. **Finished**: the full winners list is shown and can be written with
   `export [path]`. `reset` goes back to the setup page and clears
   everything, including the participant list.

## Reproducible draws

Passing `--seed <number>` makes all the draws of a session reproducible.
Combined with `--auto` and `--reference <file>`, a whole session can be
replayed and checked against a previously exported winners list.

## Output

The winners are exported with two columns, the prize label and the winner
name, in the order in which they were announced. A path ending in `.xlsx`
gives an Excel workbook with a single `得獎名單` worksheet, which is also the
default file of the console `export` command. Any other path gives a CSV
file with the same header.

*/
